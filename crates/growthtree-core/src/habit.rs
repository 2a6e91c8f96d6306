//! Daily habits and their per-habit streaks.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::category::Category;

/// A recurring daily habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Habit {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Category the habit feeds
    pub category: Category,
    /// Consecutive completion count
    pub streak: u32,
    /// Whether the habit is checked off for today
    pub completed_today: bool,
    /// Calendar days the habit was completed
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Direction of a habit toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HabitToggle {
    /// false -> true
    Completed,
    /// true -> false
    Undone,
}

impl Habit {
    /// Create a habit with no history. The title is stored trimmed.
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Habit {
            id: format!("habit-{}", uuid::Uuid::new_v4()),
            title: title.into().trim().to_string(),
            category,
            streak: 0,
            completed_today: false,
            completed_dates: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Flip `completed_today` for `today`.
    ///
    /// Completing adds `today` to the date set and extends the streak; undoing
    /// removes it and shortens the streak, never below zero.
    pub fn toggle(&mut self, today: NaiveDate) -> HabitToggle {
        if self.completed_today {
            self.completed_today = false;
            self.completed_dates.remove(&today);
            self.streak = self.streak.saturating_sub(1);
            HabitToggle::Undone
        } else {
            self.completed_today = true;
            self.completed_dates.insert(today);
            self.streak += 1;
            HabitToggle::Completed
        }
    }

    pub fn completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// The seven days ending at `today`, oldest first, with completion flags.
    pub fn last_7_days(&self, today: NaiveDate) -> [(NaiveDate, bool); 7] {
        std::array::from_fn(|i| {
            let date = today - Duration::days(6 - i as i64);
            (date, self.completed_on(date))
        })
    }
}
