//! Weekly challenge and weekly action counters.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Monday of the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

/// A weekly target for gamified actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WeeklyChallenge {
    pub title: String,
    pub description: String,
    /// Saturates at `target`
    pub progress: u32,
    pub target: u32,
    /// Monday the current counting week began
    pub week_start: NaiveDate,
    /// Actions recorded this week, not capped
    #[serde(default)]
    pub weekly_actions: u32,
}

impl WeeklyChallenge {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        target: u32,
        today: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            progress: 0,
            target: target.max(1),
            week_start: week_start(today),
            weekly_actions: 0,
        }
    }

    /// Reset counters when `today` falls in a later week. Returns true if a
    /// rollover happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        let current = week_start(today);
        if current > self.week_start {
            self.week_start = current;
            self.progress = 0;
            self.weekly_actions = 0;
            true
        } else {
            false
        }
    }

    /// Count one action on `today`. Returns true when this action completed
    /// the challenge.
    pub fn record_action(&mut self, today: NaiveDate) -> bool {
        self.roll_over(today);
        self.weekly_actions += 1;
        if self.progress < self.target {
            self.progress += 1;
            self.progress == self.target
        } else {
            false
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }

    pub fn percent(&self) -> f64 {
        self.progress as f64 / self.target as f64 * 100.0
    }

    /// Whole days left in the counting week, including `today`.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.week_start + Duration::days(7) - today).num_days().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-03-12 is a Wednesday.
        assert_eq!(week_start(day(3, 12)), day(3, 10));
        assert_eq!(week_start(day(3, 10)), day(3, 10));
        assert_eq!(week_start(day(3, 16)), day(3, 10));
    }

    #[test]
    fn progress_saturates_at_target() {
        let today = day(3, 12);
        let mut challenge = WeeklyChallenge::new("Move", "Take actions", 2, today);
        assert!(!challenge.record_action(today));
        assert!(challenge.record_action(today));
        assert!(!challenge.record_action(today));
        assert_eq!(challenge.progress, 2);
        assert_eq!(challenge.weekly_actions, 3);
        assert!(challenge.is_complete());
        assert_eq!(challenge.percent(), 100.0);
    }

    #[test]
    fn new_week_resets_counters() {
        let mut challenge = WeeklyChallenge::new("Move", "Take actions", 5, day(3, 12));
        challenge.record_action(day(3, 12));
        challenge.record_action(day(3, 16));
        assert_eq!(challenge.weekly_actions, 2);

        challenge.record_action(day(3, 17));
        assert_eq!(challenge.week_start, day(3, 17));
        assert_eq!(challenge.weekly_actions, 1);
        assert_eq!(challenge.progress, 1);
    }

    #[test]
    fn days_left_in_week() {
        let challenge = WeeklyChallenge::new("Move", "", 5, day(3, 12));
        assert_eq!(challenge.days_left(day(3, 10)), 7);
        assert_eq!(challenge.days_left(day(3, 16)), 1);
        assert_eq!(challenge.days_left(day(3, 20)), 0);
    }

    #[test]
    fn zero_target_is_bumped_to_one() {
        let challenge = WeeklyChallenge::new("Move", "", 0, day(3, 12));
        assert_eq!(challenge.target, 1);
    }
}
