//! XP/level progression and the daily activity streak.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// XP needed to leave `level`.
pub fn level_threshold(level: u32) -> u32 {
    1000 + level.saturating_mul(500)
}

/// Experience points and level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct XpState {
    pub current_xp: u32,
    /// Starts at 1
    pub level: u32,
}

impl Default for XpState {
    fn default() -> Self {
        Self {
            current_xp: 0,
            level: 1,
        }
    }
}

impl XpState {
    pub fn xp_to_next_level(&self) -> u32 {
        level_threshold(self.level).saturating_sub(self.current_xp)
    }

    /// Fraction of the current level completed, in [0, 1].
    pub fn progress_fraction(&self) -> f64 {
        let total = level_threshold(self.level) as f64;
        (self.current_xp as f64 / total).min(1.0)
    }

    /// Add XP and apply the level-up rule. Returns the number of levels gained.
    ///
    /// Crossing a threshold resets `current_xp` to zero; the remainder is not
    /// carried into the next level.
    pub fn award(&mut self, amount: u32) -> u32 {
        self.current_xp = self.current_xp.saturating_add(amount);
        let mut gained = 0;
        while self.current_xp >= level_threshold(self.level) {
            self.level += 1;
            self.current_xp = 0;
            gained += 1;
        }
        gained
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.level >= 1 && self.current_xp < level_threshold(self.level)
    }
}

/// Consecutive-day activity streak with a high-water mark.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StreakCounter {
    pub current: u32,
    pub longest: u32,
    /// Last calendar day with qualifying activity
    #[serde(default)]
    pub last_active: Option<NaiveDate>,
}

impl StreakCounter {
    /// Record activity on `day`. Counts at most once per day: continues the
    /// run from yesterday, otherwise starts a new run at 1. Returns true when
    /// the counter changed.
    pub fn record_activity(&mut self, day: NaiveDate) -> bool {
        match self.last_active {
            Some(last) if last >= day => return false,
            Some(last) if last + Duration::days(1) == day => self.current += 1,
            _ => self.current = 1,
        }
        self.last_active = Some(day);
        self.longest = self.longest.max(self.current);
        true
    }

    pub fn tier(&self) -> StreakTier {
        StreakTier::for_days(self.current)
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.longest >= self.current
    }
}

/// Display tier for a streak length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StreakTier {
    /// Under 3 days
    Spark,
    /// 3+ days
    Seedling,
    /// 7+ days
    Glowing,
    /// 14+ days
    Charged,
    /// 30+ days
    Blazing,
}

impl StreakTier {
    pub fn for_days(days: u32) -> Self {
        match days {
            0..=2 => StreakTier::Spark,
            3..=6 => StreakTier::Seedling,
            7..=13 => StreakTier::Glowing,
            14..=29 => StreakTier::Charged,
            _ => StreakTier::Blazing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    #[test]
    fn thresholds_increase_with_level() {
        assert_eq!(level_threshold(1), 1500);
        assert_eq!(level_threshold(2), 2000);
        assert!(level_threshold(10) > level_threshold(9));
    }

    #[test]
    fn award_below_threshold() {
        let mut xp = XpState::default();
        assert_eq!(xp.award(50), 0);
        assert_eq!(xp.current_xp, 50);
        assert_eq!(xp.xp_to_next_level(), 1450);
    }

    #[test]
    fn level_up_resets_to_zero() {
        let mut xp = XpState {
            current_xp: 1499,
            level: 1,
        };
        assert_eq!(xp.award(75), 1);
        assert_eq!(xp.level, 2);
        assert_eq!(xp.current_xp, 0);
        assert_eq!(xp.xp_to_next_level(), 2000);
    }

    #[test]
    fn progress_fraction_tracks_current_level() {
        let mut xp = XpState::default();
        assert_eq!(xp.progress_fraction(), 0.0);
        xp.award(750);
        assert!((xp.progress_fraction() - 0.5).abs() < 1e-9);
        xp.award(750);
        assert_eq!(xp.level, 2);
        assert_eq!(xp.progress_fraction(), 0.0);
    }

    #[test]
    fn award_zero_never_levels() {
        let mut xp = XpState::default();
        assert_eq!(xp.award(0), 0);
        assert_eq!(xp, XpState::default());
    }

    #[test]
    fn streak_extends_across_consecutive_days() {
        let mut streak = StreakCounter::default();
        assert!(streak.record_activity(day(1)));
        assert!(!streak.record_activity(day(1)));
        assert!(streak.record_activity(day(2)));
        assert!(streak.record_activity(day(3)));
        assert_eq!(streak.current, 3);
        assert_eq!(streak.longest, 3);
    }

    #[test]
    fn gap_starts_a_new_run_but_keeps_longest() {
        let mut streak = StreakCounter::default();
        streak.record_activity(day(1));
        streak.record_activity(day(2));
        streak.record_activity(day(5));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 2);
    }

    #[test]
    fn earlier_day_is_ignored() {
        let mut streak = StreakCounter::default();
        streak.record_activity(day(5));
        assert!(!streak.record_activity(day(4)));
        assert_eq!(streak.last_active, Some(day(5)));
    }

    #[test]
    fn tiers() {
        assert_eq!(StreakTier::for_days(0), StreakTier::Spark);
        assert_eq!(StreakTier::for_days(3), StreakTier::Seedling);
        assert_eq!(StreakTier::for_days(7), StreakTier::Glowing);
        assert_eq!(StreakTier::for_days(14), StreakTier::Charged);
        assert_eq!(StreakTier::for_days(30), StreakTier::Blazing);
    }

    proptest! {
        #[test]
        fn crossing_threshold_gains_exactly_one_level(level in 1u32..50, extra in 1u32..5000) {
            let mut xp = XpState { current_xp: level_threshold(level) - 1, level };
            let gained = xp.award(extra);
            prop_assert_eq!(gained, 1);
            prop_assert_eq!(xp.level, level + 1);
            prop_assert_eq!(xp.current_xp, 0);
            prop_assert!(xp.is_valid());
        }

        #[test]
        fn longest_never_below_current(gaps in prop::collection::vec(0i64..4, 0..60)) {
            let mut streak = StreakCounter::default();
            let mut date = day(1);
            for gap in gaps {
                date = date + Duration::days(gap);
                streak.record_activity(date);
                prop_assert!(streak.is_valid());
            }
        }
    }
}
