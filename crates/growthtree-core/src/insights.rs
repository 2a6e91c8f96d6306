//! Dashboard insights projected from the store.

use serde::{Deserialize, Serialize};

use crate::category::{Category, TreeStage};
use crate::progress::StreakTier;
use crate::store::ProgressStore;

/// Overall direction of progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Stable,
    Down,
}

impl Trend {
    pub fn from_mean(mean: f64) -> Self {
        if mean > 0.5 {
            Trend::Up
        } else if mean > 0.3 {
            Trend::Stable
        } else {
            Trend::Down
        }
    }
}

/// Read-only summary for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insights {
    pub strongest: (Category, f64),
    pub weakest: (Category, f64),
    pub average: f64,
    pub trend: Trend,
    pub tree_stage: TreeStage,
    pub streak: u32,
    pub longest_streak: u32,
    pub streak_tier: StreakTier,
    pub weekly_actions: u32,
    pub completed_goals: usize,
    pub habits_completed_today: usize,
    pub habit_count: usize,
    pub message: String,
}

impl Insights {
    pub fn from_store(store: &ProgressStore) -> Self {
        let categories = store.categories();
        let average = categories.mean();
        Self {
            strongest: categories.strongest(),
            weakest: categories.weakest(),
            average,
            trend: Trend::from_mean(average),
            tree_stage: TreeStage::from_mean(average),
            streak: store.streak().current,
            longest_streak: store.streak().longest,
            streak_tier: store.streak().tier(),
            weekly_actions: store.challenge().weekly_actions,
            completed_goals: store.completed_goals(),
            habits_completed_today: store.habits_completed_today(),
            habit_count: store.habits().len(),
            message: motivational_message(average).to_string(),
        }
    }
}

pub fn motivational_message(average: f64) -> &'static str {
    if average >= 0.8 {
        "You're flourishing! Keep up the amazing work!"
    } else if average >= 0.5 {
        "Great progress! You're growing strong!"
    } else if average >= 0.3 {
        "Building momentum! Stay consistent!"
    } else {
        "Every small step counts! Start your journey today!"
    }
}
