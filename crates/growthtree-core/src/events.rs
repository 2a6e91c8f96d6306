use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::{Category, TreeStage};
use crate::checkin::CheckinRecord;

/// Every state change in the engine produces an Event.
/// The view layer drains them after each call; telemetry can forward them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ProgressEvent {
    HabitAdded {
        habit_id: String,
        category: Category,
        at: DateTime<Utc>,
    },
    HabitToggled {
        habit_id: String,
        completed_today: bool,
        streak: u32,
        at: DateTime<Utc>,
    },
    GoalAdded {
        goal_id: String,
        category: Category,
        at: DateTime<Utc>,
    },
    GoalCompleted {
        goal_id: String,
        at: DateTime<Utc>,
    },
    GoalDeleted {
        goal_id: String,
        at: DateTime<Utc>,
    },
    GoalProgressUpdated {
        goal_id: String,
        progress: f64,
        at: DateTime<Utc>,
    },
    MilestoneReached {
        goal_id: String,
        reward: String,
        at: DateTime<Utc>,
    },
    /// A category score moved. `delta` is the change after clamping.
    CategoryBoosted {
        category: Category,
        delta: f64,
        score: f64,
        at: DateTime<Utc>,
    },
    ActionRecorded {
        category: Category,
        xp: u32,
        at: DateTime<Utc>,
    },
    XpAwarded {
        amount: u32,
        current_xp: u32,
        at: DateTime<Utc>,
    },
    LevelUp {
        level: u32,
        at: DateTime<Utc>,
    },
    TreeStageChanged {
        from: TreeStage,
        to: TreeStage,
        at: DateTime<Utc>,
    },
    StreakExtended {
        current: u32,
        longest: u32,
        at: DateTime<Utc>,
    },
    ChallengeCompleted {
        title: String,
        at: DateTime<Utc>,
    },
    CheckinRecorded {
        record: CheckinRecord,
    },
    ReflectionSubmitted {
        xp: u32,
        at: DateTime<Utc>,
    },
    StateReset {
        at: DateTime<Utc>,
    },
}
