//! E2E tests for a persisted session.
//!
//! Each test opens a session over a `FileGateway` in a temporary directory,
//! drives it through the public API and reopens it from disk.

use chrono::NaiveDate;
use growthtree_core::{
    seeded_rng, Category, Config, CoreError, FileGateway, Milestone, ProgressEvent, Reflection,
    Session,
};
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn open(dir: &TempDir, today: NaiveDate) -> Session<FileGateway> {
    let gateway = FileGateway::open(dir.path()).unwrap();
    Session::open(gateway, &Config::default(), today).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn week_of_habits_survives_restarts() {
    let dir = TempDir::new().unwrap();
    let id = {
        let mut session = open(&dir, day(9));
        session.add_habit("Meditate", Category::Mental).unwrap().value.id
    };

    for d in 9..=13 {
        let mut session = open(&dir, day(d));
        let habit = session.toggle_habit(&id, day(d)).unwrap();
        assert!(habit.is_clean());
        assert!(habit.value.completed_today);
    }

    let session = open(&dir, day(13));
    let store = session.store();
    assert_eq!(store.streak().current, 5);
    assert_eq!(store.streak().longest, 5);
    let mental = store.categories().get(Category::Mental);
    assert!((mental - 0.15).abs() < 1e-9);
}

#[test]
fn goals_and_milestones_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir, day(1));
    let goal = session
        .add_tracked_goal(
            "Read 12 books",
            Category::Mental,
            "2025-12-31",
            12.0,
            "books",
            vec![Milestone::new(6.0, "Halfway"), Milestone::new(3.0, "Quarter")],
        )
        .unwrap()
        .value;
    let update = session.update_goal_progress(&goal.id, 7.0).unwrap().value;
    assert_eq!(update.milestones_reached, vec!["Quarter", "Halfway"]);
    drop(session);

    let mut session = open(&dir, day(2));
    let stored = session.store().goal(&goal.id).unwrap();
    let tracking = stored.tracking.as_ref().unwrap();
    assert_eq!(tracking.progress, 7.0);
    assert!(tracking.milestones.iter().all(|m| m.completed));

    session.complete_goal(&goal.id).unwrap();
    let events = session.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::GoalCompleted { .. })));
}

#[test]
fn actions_and_reflections_accumulate_xp() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir, day(5));
    let mut rng = seeded_rng(11);
    for _ in 0..30 {
        session.record_action(Some(Category::Finance), &mut rng, day(5));
    }
    session
        .submit_reflection(&Reflection::new("Family", "Finished the report"), day(5))
        .unwrap();
    // 30 actions award at least 750 XP; the reflection adds 50.
    let xp = *session.store().xp();
    assert!(xp.level > 1 || xp.current_xp >= 800);
    drop(session);

    let session = open(&dir, day(5));
    assert_eq!(*session.store().xp(), xp);
    for category in Category::ALL {
        assert!((0.0..=1.0).contains(&session.store().categories().get(category)));
    }
}

#[test]
fn hand_edited_file_is_reported_as_corrupt() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open(&dir, day(1));
        session.add_habit("Stretch", Category::Physical).unwrap();
    }
    std::fs::write(
        dir.path().join("progress.json"),
        r#"{"categories": {"physical": 3.0}}"#,
    )
    .unwrap();

    let gateway = FileGateway::open(dir.path()).unwrap();
    match Session::open(gateway, &Config::default(), day(1)) {
        Err(CoreError::CorruptState { key, .. }) => assert_eq!(key, "progress"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("corrupt progress should not load"),
    }
}
