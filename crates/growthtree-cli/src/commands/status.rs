use growthtree_core::{CategoryJourney, Config};
use serde_json::json;

use super::{open_session, print_json, today, CliResult};

pub fn run(config: &Config) -> CliResult {
    let session = open_session(config)?;
    let store = session.store();
    let today = today();
    let challenge = store.challenge();

    print_json(&json!({
        "profile": session.profile(),
        "tree_stage": store.tree_stage(),
        "categories": store.categories(),
        "level": store.xp().level,
        "current_xp": store.xp().current_xp,
        "xp_to_next_level": store.xp().xp_to_next_level(),
        "level_progress": store.xp().progress_fraction(),
        "streak": store.streak(),
        "streak_tier": store.streak().tier(),
        "habits_completed_today": store.habits_completed_today(),
        "habit_count": store.habits().len(),
        "total_habit_streak": store.total_habit_streak(),
        "completed_goals": store.completed_goals(),
        "goal_count": store.goals().len(),
        "weekly_challenge": {
            "title": challenge.title,
            "progress": challenge.progress,
            "target": challenge.target,
            "percent": challenge.percent(),
            "days_left": challenge.days_left(today),
            "weekly_actions": challenge.weekly_actions,
        },
        "journeys": CategoryJourney::all(store.categories()),
    }))
}
