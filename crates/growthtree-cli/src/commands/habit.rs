//! Habit commands for CLI.

use clap::Subcommand;
use growthtree_core::{Category, Config};
use serde_json::json;

use super::{finish, open_session, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a new habit
    Add {
        /// Habit title
        title: String,
        /// Category: physical, finance, mental or diet
        #[arg(long, short)]
        category: Category,
    },
    /// Mark a habit done for today, or undo today's completion
    Toggle {
        /// Habit ID
        id: String,
    },
    /// List habits with the last seven days of completions
    List,
}

pub fn run(action: HabitAction, config: &Config) -> CliResult {
    let mut session = open_session(config)?;

    match action {
        HabitAction::Add { title, category } => {
            let applied = session.add_habit(&title, category)?;
            finish(&mut session, applied)
        }
        HabitAction::Toggle { id } => {
            let applied = session.toggle_habit(&id, today())?;
            finish(&mut session, applied)
        }
        HabitAction::List => {
            let today = today();
            let habits: Vec<_> = session
                .store()
                .habits()
                .iter()
                .map(|habit| {
                    let week: Vec<bool> = habit
                        .last_7_days(today)
                        .iter()
                        .map(|(_, done)| *done)
                        .collect();
                    json!({
                        "id": habit.id,
                        "title": habit.title,
                        "category": habit.category,
                        "streak": habit.streak,
                        "completed_today": habit.completed_today,
                        "last_7_days": week,
                    })
                })
                .collect();
            print_json(&habits)
        }
    }
}
