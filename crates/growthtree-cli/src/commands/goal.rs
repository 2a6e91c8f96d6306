//! Goal commands for CLI.

use clap::Subcommand;
use growthtree_core::{Category, Config, Milestone};
use serde_json::json;

use super::{finish, open_session, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a new goal
    Add {
        /// Goal title
        title: String,
        /// Category: physical, finance, mental or diet
        #[arg(long, short)]
        category: Category,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        target_date: String,
        /// Numeric target for progress tracking
        #[arg(long)]
        target: Option<f64>,
        /// Unit for the numeric target (e.g. "km")
        #[arg(long, requires = "target", default_value = "")]
        unit: String,
        /// Milestone as VALUE:REWARD; repeatable
        #[arg(long = "milestone", value_parser = parse_milestone, requires = "target")]
        milestones: Vec<Milestone>,
    },
    /// Mark a goal completed
    Complete {
        /// Goal ID
        id: String,
    },
    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,
    },
    /// Set progress on a tracked goal
    Progress {
        /// Goal ID
        id: String,
        /// New progress value
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// List goals
    List {
        /// Only goals that are not completed yet
        #[arg(long)]
        open: bool,
    },
}

fn parse_milestone(s: &str) -> Result<Milestone, String> {
    let (value, reward) = s
        .split_once(':')
        .ok_or_else(|| format!("expected VALUE:REWARD, got '{s}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid milestone value '{value}'"))?;
    Ok(Milestone::new(value, reward.trim()))
}

pub fn run(action: GoalAction, config: &Config) -> CliResult {
    let mut session = open_session(config)?;

    match action {
        GoalAction::Add {
            title,
            category,
            target_date,
            target,
            unit,
            milestones,
        } => {
            let applied = match target {
                Some(target) => session.add_tracked_goal(
                    &title,
                    category,
                    &target_date,
                    target,
                    &unit,
                    milestones,
                )?,
                None => session.add_goal(&title, category, &target_date)?,
            };
            finish(&mut session, applied)
        }
        GoalAction::Complete { id } => {
            let applied = session.complete_goal(&id)?;
            finish(&mut session, applied)
        }
        GoalAction::Delete { id } => {
            let applied = session.delete_goal(&id)?;
            finish(&mut session, applied)
        }
        GoalAction::Progress { id, value } => {
            let applied = session.update_goal_progress(&id, value)?;
            finish(&mut session, applied)
        }
        GoalAction::List { open } => {
            let today = today();
            let goals: Vec<_> = session
                .store()
                .goals()
                .iter()
                .filter(|goal| !open || !goal.completed)
                .map(|goal| {
                    json!({
                        "goal": goal,
                        "percent_complete": goal.percent_complete(),
                        "days_left": goal.days_left(today),
                        "overdue": goal.is_overdue(today),
                    })
                })
                .collect();
            print_json(&goals)
        }
    }
}
