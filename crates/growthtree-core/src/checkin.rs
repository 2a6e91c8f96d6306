//! Daily check-in and reflection journal inputs.
//!
//! Check-ins are informational: they are validated and handed to the
//! persistence/telemetry side, never kept as engine state. Reflections award
//! XP once validated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Validated mood/energy/stress reading, each in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckinRecord {
    pub mood: u8,
    pub energy: u8,
    pub stress: u8,
    pub recorded_at: DateTime<Utc>,
}

impl CheckinRecord {
    /// Validate raw slider values.
    pub fn new(mood: i64, energy: i64, stress: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            mood: percent_field("mood", mood)?,
            energy: percent_field("energy", energy)?,
            stress: percent_field("stress", stress)?,
            recorded_at: Utc::now(),
        })
    }
}

fn percent_field(field: &str, value: i64) -> Result<u8, ValidationError> {
    bounded(field, value, 0, 100)
}

fn bounded(field: &str, value: i64, min: i64, max: i64) -> Result<u8, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

/// End-of-day reflection journal entry.
///
/// `mood` and `energy` are 1-5 ratings; 0 means not rated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reflection {
    #[serde(default)]
    pub mood: u8,
    #[serde(default)]
    pub energy: u8,
    pub gratitude: String,
    pub wins: String,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub tomorrow: String,
}

impl Reflection {
    pub fn new(gratitude: impl Into<String>, wins: impl Into<String>) -> Self {
        Self {
            gratitude: gratitude.into(),
            wins: wins.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.gratitude.trim().is_empty() {
            return Err(ValidationError::EmptyField("gratitude".to_string()));
        }
        if self.wins.trim().is_empty() {
            return Err(ValidationError::EmptyField("wins".to_string()));
        }
        bounded("mood", self.mood as i64, 0, 5)?;
        bounded("energy", self.energy as i64, 0, 5)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkin_accepts_bounds() {
        let record = CheckinRecord::new(0, 50, 100).unwrap();
        assert_eq!((record.mood, record.energy, record.stress), (0, 50, 100));
    }

    #[test]
    fn checkin_rejects_out_of_range_and_names_field() {
        let err = CheckinRecord::new(50, 101, 50).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "energy".into(),
                value: 101,
                min: 0,
                max: 100
            }
        );
        assert!(CheckinRecord::new(-1, 50, 50).is_err());
    }

    #[test]
    fn reflection_requires_gratitude_and_wins() {
        assert!(Reflection::new("Family", "Ran 5k").validate().is_ok());
        assert_eq!(
            Reflection::new("  ", "Ran 5k").validate(),
            Err(ValidationError::EmptyField("gratitude".into()))
        );
        assert_eq!(
            Reflection::new("Family", "").validate(),
            Err(ValidationError::EmptyField("wins".into()))
        );
    }

    #[test]
    fn reflection_rating_bounds() {
        let mut reflection = Reflection::new("Sun", "Shipped");
        reflection.mood = 5;
        reflection.energy = 0;
        assert!(reflection.validate().is_ok());
        reflection.mood = 6;
        assert!(reflection.validate().is_err());
    }
}
