//! Goals, with optional numeric tracking and milestones.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::ValidationError;

/// Date format accepted for target dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` target date.
pub fn parse_target_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field: "target_date".to_string(),
        value: value.to_string(),
    })
}

/// A reward checkpoint along a tracked goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Milestone {
    /// Progress value at which the milestone is reached
    pub value: f64,
    pub completed: bool,
    /// Reward label shown when reached
    pub reward: String,
}

impl Milestone {
    pub fn new(value: f64, reward: impl Into<String>) -> Self {
        Self {
            value,
            completed: false,
            reward: reward.into(),
        }
    }
}

/// Numeric progress tracking for a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GoalTracking {
    pub progress: f64,
    pub target: f64,
    /// Unit label, e.g. "km" or "$"
    pub unit: String,
    /// Ordered by ascending value
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl GoalTracking {
    /// Validate and build tracking data. Milestones are sorted by value.
    pub fn new(
        target: f64,
        unit: impl Into<String>,
        mut milestones: Vec<Milestone>,
    ) -> Result<Self, ValidationError> {
        if !target.is_finite() || target <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "target".to_string(),
                message: format!("must be a positive number, got {target}"),
            });
        }
        if let Some(bad) = milestones
            .iter()
            .find(|m| !m.value.is_finite() || m.value < 0.0 || m.value > target)
        {
            return Err(ValidationError::InvalidValue {
                field: "milestones".to_string(),
                message: format!("milestone value {} must be within [0, {target}]", bad.value),
            });
        }
        milestones.sort_by(|a, b| a.value.total_cmp(&b.value));
        Ok(Self {
            progress: 0.0,
            target,
            unit: unit.into(),
            milestones,
        })
    }

    /// Set progress clamped to [0, target] and mark milestones that are now
    /// reached. Returns the rewards reached by this update.
    pub(crate) fn set_progress(&mut self, progress: f64) -> Vec<String> {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, self.target)
        };
        let mut reached = Vec::new();
        for milestone in &mut self.milestones {
            if !milestone.completed && milestone.value <= self.progress {
                milestone.completed = true;
                reached.push(milestone.reward.clone());
            }
        }
        reached
    }

    pub fn percent(&self) -> f64 {
        self.progress / self.target * 100.0
    }

    /// Next milestone not yet reached.
    pub fn next_milestone(&self) -> Option<&Milestone> {
        self.milestones.iter().find(|m| !m.completed)
    }
}

/// A user goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Goal {
    /// Unique identifier
    pub id: String,
    pub title: String,
    pub category: Category,
    pub target_date: NaiveDate,
    /// Monotonic: once true it stays true
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<GoalTracking>,
}

impl Goal {
    pub fn new(title: impl Into<String>, category: Category, target_date: NaiveDate) -> Self {
        Goal {
            id: format!("goal-{}", uuid::Uuid::new_v4()),
            title: title.into().trim().to_string(),
            category,
            target_date,
            completed: false,
            created_at: Utc::now(),
            tracking: None,
        }
    }

    pub fn with_tracking(mut self, tracking: GoalTracking) -> Self {
        self.tracking = Some(tracking);
        self
    }

    /// Completion percentage in [0, 100].
    pub fn percent_complete(&self) -> f64 {
        match (&self.tracking, self.completed) {
            (_, true) => 100.0,
            (Some(tracking), false) => tracking.percent(),
            (None, false) => 0.0,
        }
    }

    /// Days until the target date. Negative when overdue.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.target_date - today).num_days()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.days_left(today) < 0
    }
}
