//! The progress engine: authoritative in-memory state plus the transitions
//! the view layer is allowed to trigger.
//!
//! Every operation validates its input before touching state, so an `Err`
//! leaves the store exactly as it was. Successful operations queue
//! [`ProgressEvent`]s that the caller drains with [`ProgressStore::drain_events`].

use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::actions;
use crate::category::{Category, CategoryScores, TreeStage};
use crate::challenge::WeeklyChallenge;
use crate::checkin::{CheckinRecord, Reflection};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::ProgressEvent;
use crate::goal::{parse_target_date, Goal, GoalTracking, Milestone};
use crate::habit::{Habit, HabitToggle};
use crate::progress::{StreakCounter, XpState};
use crate::storage::config::{ChallengeConfig, EngineConfig};

/// Category, streak, XP and challenge state. Persisted under its own key,
/// separate from the habit and goal collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProgressRecord {
    pub categories: CategoryScores,
    pub streak: StreakCounter,
    pub xp: XpState,
    #[serde(default)]
    pub challenge: Option<WeeklyChallenge>,
}

/// Complete serialized engine state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProgressSnapshot {
    pub categories: CategoryScores,
    pub habits: Vec<Habit>,
    pub goals: Vec<Goal>,
    pub streak: StreakCounter,
    pub xp: XpState,
    #[serde(default)]
    pub challenge: Option<WeeklyChallenge>,
}

impl ProgressSnapshot {
    pub fn from_parts(habits: Vec<Habit>, goals: Vec<Goal>, record: ProgressRecord) -> Self {
        Self {
            categories: record.categories,
            habits,
            goals,
            streak: record.streak,
            xp: record.xp,
            challenge: record.challenge,
        }
    }

    pub fn into_parts(self) -> (Vec<Habit>, Vec<Goal>, ProgressRecord) {
        (
            self.habits,
            self.goals,
            ProgressRecord {
                categories: self.categories,
                streak: self.streak,
                xp: self.xp,
                challenge: self.challenge,
            },
        )
    }

    /// Check invariants serde cannot express.
    fn check(&self) -> std::result::Result<(), String> {
        if !self.categories.in_range() {
            return Err("category score outside [0, 1]".to_string());
        }
        if !self.xp.is_valid() {
            return Err(format!(
                "xp state is inconsistent (level {}, current_xp {})",
                self.xp.level, self.xp.current_xp
            ));
        }
        if !self.streak.is_valid() {
            return Err("longest streak is below current streak".to_string());
        }
        let mut ids = HashSet::new();
        for habit in &self.habits {
            if !ids.insert(habit.id.as_str()) {
                return Err(format!("duplicate habit id '{}'", habit.id));
            }
        }
        ids.clear();
        for goal in &self.goals {
            if !ids.insert(goal.id.as_str()) {
                return Err(format!("duplicate goal id '{}'", goal.id));
            }
            if let Some(tracking) = &goal.tracking {
                let valid = tracking.target.is_finite()
                    && tracking.target > 0.0
                    && (0.0..=tracking.target).contains(&tracking.progress);
                if !valid {
                    return Err(format!("goal '{}' has invalid progress/target", goal.id));
                }
            }
        }
        Ok(())
    }
}

/// Result of a take-action event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionOutcome {
    pub category: Category,
    /// Score change after clamping
    pub delta: f64,
    pub xp_awarded: u32,
    pub levels_gained: u32,
    pub suggestion: String,
    pub tree_stage: TreeStage,
}

/// Result of an XP award.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct XpAward {
    pub amount: u32,
    pub levels_gained: u32,
    pub level: u32,
    pub current_xp: u32,
}

/// Result of a goal progress update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressUpdate {
    pub goal: Goal,
    /// Milestone rewards reached by this update
    pub milestones_reached: Vec<String>,
}

/// In-memory progress state for one user session.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    categories: CategoryScores,
    habits: Vec<Habit>,
    goals: Vec<Goal>,
    streak: StreakCounter,
    xp: XpState,
    challenge: WeeklyChallenge,
    engine: EngineConfig,
    challenge_defaults: ChallengeConfig,
    events: Vec<ProgressEvent>,
}

impl ProgressStore {
    /// Fresh state with the default seed scores.
    pub fn new(engine: EngineConfig, challenge: ChallengeConfig, today: NaiveDate) -> Self {
        Self {
            categories: CategoryScores::default(),
            habits: Vec::new(),
            goals: Vec::new(),
            streak: StreakCounter::default(),
            xp: XpState::default(),
            challenge: challenge.build(today),
            engine,
            challenge_defaults: challenge,
            events: Vec::new(),
        }
    }

    /// Restore from a JSON snapshot, or start fresh when none is given.
    ///
    /// `None` and JSON `null` both mean "no snapshot". Anything else must
    /// match the snapshot shape exactly or this fails with `CorruptState`.
    pub fn initialize(
        snapshot: Option<&serde_json::Value>,
        engine: EngineConfig,
        challenge: ChallengeConfig,
        today: NaiveDate,
    ) -> Result<Self> {
        match snapshot {
            None | Some(serde_json::Value::Null) => Ok(Self::new(engine, challenge, today)),
            Some(value) => {
                let snapshot: ProgressSnapshot = serde_json::from_value(value.clone())
                    .map_err(|e| CoreError::corrupt("snapshot", e.to_string()))?;
                Self::from_snapshot(snapshot, engine, challenge, today)
            }
        }
    }

    /// Restore verbatim from a typed snapshot.
    pub fn from_snapshot(
        snapshot: ProgressSnapshot,
        engine: EngineConfig,
        challenge: ChallengeConfig,
        today: NaiveDate,
    ) -> Result<Self> {
        snapshot
            .check()
            .map_err(|message| CoreError::corrupt("snapshot", message))?;
        let active_challenge = snapshot
            .challenge
            .unwrap_or_else(|| challenge.build(today));
        Ok(Self {
            categories: snapshot.categories,
            habits: snapshot.habits,
            goals: snapshot.goals,
            streak: snapshot.streak,
            xp: snapshot.xp,
            challenge: active_challenge,
            engine,
            challenge_defaults: challenge,
            events: Vec::new(),
        })
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            categories: self.categories,
            habits: self.habits.clone(),
            goals: self.goals.clone(),
            streak: self.streak,
            xp: self.xp,
            challenge: Some(self.challenge.clone()),
        }
    }

    /// Full session reset back to defaults.
    pub fn reset(&mut self, today: NaiveDate) {
        let events = std::mem::take(&mut self.events);
        *self = Self::new(self.engine.clone(), self.challenge_defaults.clone(), today);
        self.events = events;
        self.events.push(ProgressEvent::StateReset { at: Utc::now() });
        tracing::info!("Progress state reset");
    }

    /// Align per-day flags with `today`: habits not completed today lose
    /// their `completed_today` flag. Streaks are untouched. Returns the
    /// number of habits changed.
    pub fn start_day(&mut self, today: NaiveDate) -> usize {
        let mut changed = 0;
        for habit in &mut self.habits {
            let done = habit.completed_on(today);
            if habit.completed_today != done {
                habit.completed_today = done;
                changed += 1;
            }
        }
        if self.challenge.roll_over(today) {
            tracing::debug!(week_start = %self.challenge.week_start, "Weekly challenge rolled over");
        }
        changed
    }

    // --- Readers ---------------------------------------------------------

    pub fn categories(&self) -> &CategoryScores {
        &self.categories
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn streak(&self) -> &StreakCounter {
        &self.streak
    }

    pub fn xp(&self) -> &XpState {
        &self.xp
    }

    pub fn challenge(&self) -> &WeeklyChallenge {
        &self.challenge
    }

    pub fn tree_stage(&self) -> TreeStage {
        self.categories.tree_stage()
    }

    pub fn habits_completed_today(&self) -> usize {
        self.habits.iter().filter(|h| h.completed_today).count()
    }

    pub fn total_habit_streak(&self) -> u32 {
        self.habits.iter().map(|h| h.streak).sum()
    }

    pub fn completed_goals(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<ProgressEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Habits ----------------------------------------------------------

    pub fn add_habit(&mut self, title: &str, category: Category) -> Result<Habit> {
        require_text("title", title)?;
        let habit = Habit::new(title, category);
        tracing::debug!(habit_id = %habit.id, %category, "Habit added");
        self.events.push(ProgressEvent::HabitAdded {
            habit_id: habit.id.clone(),
            category,
            at: Utc::now(),
        });
        self.habits.push(habit.clone());
        Ok(habit)
    }

    /// Flip a habit's completion for `today`.
    ///
    /// Completing boosts the habit's category; undoing does not take the
    /// boost back.
    pub fn toggle_habit(&mut self, id: &str, today: NaiveDate) -> Result<Habit> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::habit_not_found(id))?;

        let direction = self.habits[index].toggle(today);
        let habit = self.habits[index].clone();
        tracing::debug!(habit_id = %habit.id, ?direction, streak = habit.streak, "Habit toggled");
        self.events.push(ProgressEvent::HabitToggled {
            habit_id: habit.id.clone(),
            completed_today: habit.completed_today,
            streak: habit.streak,
            at: Utc::now(),
        });

        if direction == HabitToggle::Completed {
            self.boost(habit.category, self.engine.habit_boost);
            self.record_activity(today);
        }
        Ok(habit)
    }

    // --- Goals -----------------------------------------------------------

    pub fn add_goal(&mut self, title: &str, category: Category, target_date: &str) -> Result<Goal> {
        require_text("title", title)?;
        let date = parse_target_date(target_date)?;
        Ok(self.insert_goal(Goal::new(title, category, date)))
    }

    /// Add a goal with numeric progress tracking and milestones.
    pub fn add_tracked_goal(
        &mut self,
        title: &str,
        category: Category,
        target_date: &str,
        target: f64,
        unit: &str,
        milestones: Vec<Milestone>,
    ) -> Result<Goal> {
        require_text("title", title)?;
        let date = parse_target_date(target_date)?;
        let tracking = GoalTracking::new(target, unit, milestones)?;
        Ok(self.insert_goal(Goal::new(title, category, date).with_tracking(tracking)))
    }

    fn insert_goal(&mut self, goal: Goal) -> Goal {
        tracing::debug!(goal_id = %goal.id, category = %goal.category, "Goal added");
        self.events.push(ProgressEvent::GoalAdded {
            goal_id: goal.id.clone(),
            category: goal.category,
            at: Utc::now(),
        });
        self.goals.push(goal.clone());
        goal
    }

    /// Mark a goal completed. Completing an already-completed goal is a
    /// no-op: the category boost is applied once.
    pub fn complete_goal(&mut self, id: &str) -> Result<Goal> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| CoreError::goal_not_found(id))?;
        if goal.completed {
            return Ok(goal.clone());
        }
        goal.completed = true;
        let goal = goal.clone();

        tracing::info!(goal_id = %goal.id, title = %goal.title, "Goal completed");
        self.events.push(ProgressEvent::GoalCompleted {
            goal_id: goal.id.clone(),
            at: Utc::now(),
        });
        self.boost(goal.category, self.engine.goal_boost);
        Ok(goal)
    }

    /// Remove a goal whatever its state. Scores are left as they are.
    pub fn delete_goal(&mut self, id: &str) -> Result<Goal> {
        let index = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| CoreError::goal_not_found(id))?;
        let goal = self.goals.remove(index);
        tracing::debug!(goal_id = %goal.id, "Goal deleted");
        self.events.push(ProgressEvent::GoalDeleted {
            goal_id: goal.id.clone(),
            at: Utc::now(),
        });
        Ok(goal)
    }

    /// Set a tracked goal's progress, clamped to [0, target].
    ///
    /// Reaching the target does not complete the goal; that stays an
    /// explicit [`complete_goal`](Self::complete_goal).
    pub fn update_goal_progress(&mut self, id: &str, progress: f64) -> Result<ProgressUpdate> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| CoreError::goal_not_found(id))?;
        let tracking = goal.tracking.as_mut().ok_or_else(|| ValidationError::InvalidValue {
            field: "progress".to_string(),
            message: format!("goal '{id}' has no numeric target"),
        })?;

        let reached = tracking.set_progress(progress);
        let goal = goal.clone();
        let now = Utc::now();
        self.events.push(ProgressEvent::GoalProgressUpdated {
            goal_id: goal.id.clone(),
            progress: goal.tracking.as_ref().map(|t| t.progress).unwrap_or_default(),
            at: now,
        });
        for reward in &reached {
            tracing::info!(goal_id = %goal.id, %reward, "Milestone reached");
            self.events.push(ProgressEvent::MilestoneReached {
                goal_id: goal.id.clone(),
                reward: reward.clone(),
                at: now,
            });
        }
        Ok(ProgressUpdate {
            goal,
            milestones_reached: reached,
        })
    }

    // --- Gamification ----------------------------------------------------

    /// Take-action event: boost a category picked by `rng`, award random XP.
    pub fn record_action<R: Rng + ?Sized>(
        &mut self,
        focus: Option<Category>,
        rng: &mut R,
        today: NaiveDate,
    ) -> ActionOutcome {
        let category = actions::choose_category(focus, self.engine.focus_probability, rng);
        let suggestion = actions::suggest(category, rng);
        let (min, max) = self.engine.action_xp_range();
        let xp = rng.gen_range(min..=max);

        let delta = self.boost(category, self.engine.action_boost);
        self.events.push(ProgressEvent::ActionRecorded {
            category,
            xp,
            at: Utc::now(),
        });
        let award = self.award_xp(xp);
        self.record_activity(today);

        if self.challenge.record_action(today) {
            tracing::info!(title = %self.challenge.title, "Weekly challenge completed");
            self.events.push(ProgressEvent::ChallengeCompleted {
                title: self.challenge.title.clone(),
                at: Utc::now(),
            });
        }

        tracing::debug!(%category, delta, xp, "Action recorded");
        ActionOutcome {
            category,
            delta,
            xp_awarded: xp,
            levels_gained: award.levels_gained,
            suggestion,
            tree_stage: self.tree_stage(),
        }
    }

    /// Validate a check-in and queue it for the telemetry side. Scores and
    /// XP are unaffected.
    pub fn record_checkin(&mut self, mood: i64, energy: i64, stress: i64) -> Result<CheckinRecord> {
        let record = CheckinRecord::new(mood, energy, stress)?;
        tracing::debug!(mood, energy, stress, "Check-in recorded");
        self.events.push(ProgressEvent::CheckinRecorded {
            record: record.clone(),
        });
        Ok(record)
    }

    /// Accept a reflection and award the reflection XP.
    pub fn submit_reflection(&mut self, reflection: &Reflection, today: NaiveDate) -> Result<XpAward> {
        reflection.validate()?;
        let amount = self.engine.reflection_xp;
        self.events.push(ProgressEvent::ReflectionSubmitted {
            xp: amount,
            at: Utc::now(),
        });
        let award = self.award_xp(amount);
        self.record_activity(today);
        Ok(award)
    }

    /// Award XP and run the level-up rule.
    pub fn award_xp(&mut self, amount: u32) -> XpAward {
        let levels_gained = self.xp.award(amount);
        let now = Utc::now();
        self.events.push(ProgressEvent::XpAwarded {
            amount,
            current_xp: self.xp.current_xp,
            at: now,
        });
        if levels_gained > 0 {
            tracing::info!(level = self.xp.level, "Level up");
            self.events.push(ProgressEvent::LevelUp {
                level: self.xp.level,
                at: now,
            });
        }
        XpAward {
            amount,
            levels_gained,
            level: self.xp.level,
            current_xp: self.xp.current_xp,
        }
    }

    fn boost(&mut self, category: Category, amount: f64) -> f64 {
        let before = self.tree_stage();
        let delta = self.categories.boost(category, amount);
        let now = Utc::now();
        self.events.push(ProgressEvent::CategoryBoosted {
            category,
            delta,
            score: self.categories.get(category),
            at: now,
        });
        let after = self.tree_stage();
        if after != before {
            tracing::info!(from = %before, to = %after, "Tree stage changed");
            self.events.push(ProgressEvent::TreeStageChanged {
                from: before,
                to: after,
                at: now,
            });
        }
        delta
    }

    fn record_activity(&mut self, today: NaiveDate) {
        if self.streak.record_activity(today) {
            self.events.push(ProgressEvent::StreakExtended {
                current: self.streak.current,
                longest: self.streak.longest,
                at: Utc::now(),
            });
        }
    }
}

fn require_text(field: &str, value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::seeded_rng;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 11).unwrap()
    }

    fn store() -> ProgressStore {
        ProgressStore::new(EngineConfig::default(), ChallengeConfig::default(), today())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn boost_count(events: &[ProgressEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::CategoryBoosted { .. }))
            .count()
    }

    #[test]
    fn initialize_without_snapshot_uses_defaults() {
        let store = ProgressStore::initialize(
            None,
            EngineConfig::default(),
            ChallengeConfig::default(),
            today(),
        )
        .unwrap();
        assert_eq!(*store.categories(), CategoryScores::default());
        assert!(store.habits().is_empty());
        assert!(store.goals().is_empty());
        assert_eq!(store.streak().current, 0);
        assert_eq!(store.xp().level, 1);
        assert_eq!(store.xp().current_xp, 0);
    }

    #[test]
    fn habit_summaries() {
        let mut store = store();
        let walk = store.add_habit("Walk", Category::Physical).unwrap();
        let read = store.add_habit("Read", Category::Mental).unwrap();
        store.add_habit("Budget", Category::Finance).unwrap();
        store.toggle_habit(&walk.id, today()).unwrap();
        store.toggle_habit(&read.id, today()).unwrap();

        assert_eq!(store.habits_completed_today(), 2);
        assert_eq!(store.total_habit_streak(), 2);

        store.toggle_habit(&read.id, today()).unwrap();
        assert_eq!(store.habits_completed_today(), 1);
        assert_eq!(store.total_habit_streak(), 1);
    }

    #[test]
    fn initialize_null_snapshot_uses_defaults() {
        let store = ProgressStore::initialize(
            Some(&serde_json::Value::Null),
            EngineConfig::default(),
            ChallengeConfig::default(),
            today(),
        )
        .unwrap();
        assert_eq!(store.xp().level, 1);
    }

    #[test]
    fn initialize_rejects_wrong_shape() {
        let bad = serde_json::json!({ "habits": "not a list" });
        let err = ProgressStore::initialize(
            Some(&bad),
            EngineConfig::default(),
            ChallengeConfig::default(),
            today(),
        )
        .unwrap_err();
        assert!(err.is_corrupt_state());
    }

    #[test]
    fn initialize_rejects_out_of_range_scores() {
        let mut value = serde_json::to_value(store().snapshot()).unwrap();
        value["categories"]["mental"] = serde_json::json!(1.5);
        let err = ProgressStore::initialize(
            Some(&value),
            EngineConfig::default(),
            ChallengeConfig::default(),
            today(),
        )
        .unwrap_err();
        assert!(err.is_corrupt_state());
    }

    #[test]
    fn add_habit_validates_title() {
        let mut store = store();
        let err = store.add_habit("   ", Category::Diet).unwrap_err();
        assert!(err.is_validation());
        assert!(store.habits().is_empty());
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn habit_scenario_boost_is_not_reversed() {
        let mut store = store();
        let habit = store.add_habit("Drink water", Category::Diet).unwrap();
        assert_eq!(habit.streak, 0);
        assert!(close(store.categories().get(Category::Diet), 0.20));

        let toggled = store.toggle_habit(&habit.id, today()).unwrap();
        assert!(toggled.completed_today);
        assert_eq!(toggled.streak, 1);
        assert!(close(store.categories().get(Category::Diet), 0.22));

        let undone = store.toggle_habit(&habit.id, today()).unwrap();
        assert!(!undone.completed_today);
        assert_eq!(undone.streak, 0);
        assert!(close(store.categories().get(Category::Diet), 0.22));
    }

    #[test]
    fn toggle_unknown_habit_is_not_found() {
        let mut store = store();
        assert!(store.toggle_habit("habit-missing", today()).unwrap_err().is_not_found());
    }

    #[test]
    fn goal_scenario_boost_applies_once() {
        let mut store = store();
        let goal = store
            .add_goal("Save $1000", Category::Finance, "2025-12-31")
            .unwrap();
        assert!(!goal.completed);
        store.drain_events();

        let done = store.complete_goal(&goal.id).unwrap();
        assert!(done.completed);
        assert!(close(store.categories().get(Category::Finance), 0.25));
        let first = store.drain_events();
        assert_eq!(boost_count(&first), 1);

        store.complete_goal(&goal.id).unwrap();
        assert!(close(store.categories().get(Category::Finance), 0.25));
        assert_eq!(boost_count(&store.drain_events()), 0);
    }

    #[test]
    fn add_goal_requires_title_and_date() {
        let mut store = store();
        assert!(store.add_goal("", Category::Finance, "2025-12-31").unwrap_err().is_validation());
        assert!(store.add_goal("Save", Category::Finance, "").unwrap_err().is_validation());
        assert!(store.add_goal("Save", Category::Finance, "soon").unwrap_err().is_validation());
        assert!(store.goals().is_empty());
    }

    #[test]
    fn deleted_goal_is_gone_for_later_operations() {
        let mut store = store();
        let goal = store
            .add_tracked_goal("Run", Category::Physical, "2025-09-01", 10.0, "km", vec![])
            .unwrap();
        store.complete_goal(&goal.id).unwrap();
        let finance_before = *store.categories();

        store.delete_goal(&goal.id).unwrap();
        assert!(store.goal(&goal.id).is_none());
        assert_eq!(*store.categories(), finance_before);
        assert!(store.complete_goal(&goal.id).unwrap_err().is_not_found());
        assert!(store.update_goal_progress(&goal.id, 3.0).unwrap_err().is_not_found());
        assert!(store.delete_goal(&goal.id).unwrap_err().is_not_found());
    }

    #[test]
    fn progress_clamps_and_does_not_complete() {
        let mut store = store();
        let goal = store
            .add_tracked_goal(
                "Read books",
                Category::Mental,
                "2025-12-31",
                12.0,
                "books",
                vec![Milestone::new(6.0, "Bookmark"), Milestone::new(12.0, "Library card")],
            )
            .unwrap();

        let update = store.update_goal_progress(&goal.id, 40.0).unwrap();
        let tracking = update.goal.tracking.as_ref().unwrap();
        assert_eq!(tracking.progress, 12.0);
        assert!(!update.goal.completed);
        assert_eq!(update.milestones_reached, vec!["Bookmark", "Library card"]);

        let update = store.update_goal_progress(&goal.id, -3.0).unwrap();
        assert_eq!(update.goal.tracking.unwrap().progress, 0.0);
        assert!(update.milestones_reached.is_empty());
    }

    #[test]
    fn progress_on_untracked_goal_is_validation_error() {
        let mut store = store();
        let goal = store.add_goal("Meditate", Category::Mental, "2025-12-31").unwrap();
        assert!(store.update_goal_progress(&goal.id, 1.0).unwrap_err().is_validation());
    }

    #[test]
    fn action_with_pinned_focus_boosts_focus() {
        let mut engine = EngineConfig::default();
        engine.focus_probability = 1.0;
        let mut store = ProgressStore::new(engine, ChallengeConfig::default(), today());
        let mut rng = seeded_rng(99);

        let outcome = store.record_action(Some(Category::Diet), &mut rng, today());
        assert_eq!(outcome.category, Category::Diet);
        assert!(close(store.categories().get(Category::Diet), 0.30));
        assert!(close(outcome.delta, 0.10));
        assert!((25..=75).contains(&outcome.xp_awarded));
        assert_eq!(store.xp().current_xp, outcome.xp_awarded);
        assert_eq!(outcome.tree_stage, TreeStage::Sprout);
        assert_eq!(store.challenge().weekly_actions, 1);
        assert_eq!(store.streak().current, 1);
    }

    #[test]
    fn same_seed_gives_same_outcome() {
        let mut a = store();
        let mut b = store();
        let first = a.record_action(Some(Category::Mental), &mut seeded_rng(5), today());
        let second = b.record_action(Some(Category::Mental), &mut seeded_rng(5), today());
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_actions_reach_flourishing_and_stay_clamped() {
        let mut store = store();
        let mut rng = seeded_rng(1);
        for _ in 0..200 {
            store.record_action(None, &mut rng, today());
        }
        for (_, score) in store.categories().iter() {
            assert!((0.0..=1.0).contains(&score));
        }
        assert_eq!(store.tree_stage(), TreeStage::Flourishing);
        let events = store.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressEvent::TreeStageChanged { to: TreeStage::Growing, .. })));
        assert!(events.iter().any(|e| matches!(e, ProgressEvent::LevelUp { .. })));
    }

    #[test]
    fn checkin_validates_and_leaves_state_alone() {
        let mut store = store();
        let before = store.snapshot();
        assert!(store.record_checkin(50, 120, 10).unwrap_err().is_validation());
        let record = store.record_checkin(70, 40, 20).unwrap();
        assert_eq!(record.mood, 70);
        assert_eq!(store.snapshot(), before);
        assert!(matches!(
            store.drain_events().as_slice(),
            [ProgressEvent::CheckinRecorded { .. }]
        ));
    }

    #[test]
    fn reflection_awards_fifty_xp() {
        let mut store = store();
        let award = store
            .submit_reflection(&Reflection::new("Good coffee", "Finished report"), today())
            .unwrap();
        assert_eq!(award.amount, 50);
        assert_eq!(store.xp().current_xp, 50);

        let err = store
            .submit_reflection(&Reflection::new("", "Finished report"), today())
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.xp().current_xp, 50);
    }

    #[test]
    fn reflection_can_level_up() {
        let mut store = store();
        store.award_xp(1499);
        let award = store
            .submit_reflection(&Reflection::new("Rain", "Cooked dinner"), today())
            .unwrap();
        assert_eq!(award.levels_gained, 1);
        assert_eq!(award.level, 2);
        assert_eq!(award.current_xp, 0);
    }

    #[test]
    fn start_day_clears_stale_completion_flags() {
        let mut store = store();
        let id = store.add_habit("Walk", Category::Physical).unwrap().id;
        store.toggle_habit(&id, today()).unwrap();

        let tomorrow = today().succ_opt().unwrap();
        assert_eq!(store.start_day(tomorrow), 1);
        let habit = store.habit(&id).unwrap();
        assert!(!habit.completed_today);
        assert_eq!(habit.streak, 1);

        let again = store.toggle_habit(&id, tomorrow).unwrap();
        assert_eq!(again.streak, 2);
        assert_eq!(store.streak().current, 2);
    }

    #[test]
    fn snapshot_round_trip_is_lossless() {
        let mut store = store();
        let habit = store.add_habit("Stretch", Category::Physical).unwrap();
        store.toggle_habit(&habit.id, today()).unwrap();
        let goal = store
            .add_tracked_goal("Save", Category::Finance, "2025-12-31", 1000.0, "$", vec![])
            .unwrap();
        store.update_goal_progress(&goal.id, 250.0).unwrap();
        store.record_action(Some(Category::Mental), &mut seeded_rng(8), today());

        let json = serde_json::to_value(store.snapshot()).unwrap();
        let restored = ProgressStore::initialize(
            Some(&json),
            EngineConfig::default(),
            ChallengeConfig::default(),
            today(),
        )
        .unwrap();
        assert_eq!(restored.snapshot(), store.snapshot());
        assert_eq!(serde_json::to_value(restored.snapshot()).unwrap(), json);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut store = store();
        store.add_habit("Walk", Category::Physical).unwrap();
        store.award_xp(500);
        store.reset(today());
        assert!(store.habits().is_empty());
        assert_eq!(*store.xp(), XpState::default());
        assert!(store
            .drain_events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::StateReset { .. })));
    }

    proptest! {
        #[test]
        fn toggle_sequences_alternate(n in 1usize..40) {
            let mut store = store();
            let habit = store.add_habit("Water", Category::Diet).unwrap();
            for i in 0..n {
                let h = store.toggle_habit(&habit.id, today()).unwrap();
                prop_assert_eq!(h.completed_today, i % 2 == 0);
            }
            for (_, score) in store.categories().iter() {
                prop_assert!((0.0..=1.0).contains(&score));
            }
        }
    }
}
