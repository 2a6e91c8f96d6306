use clap::Args;
use growthtree_core::{Config, Reflection};

use super::{finish, open_session, today, CliResult};

#[derive(Args)]
pub struct ReflectArgs {
    /// What you are grateful for today
    #[arg(long)]
    gratitude: String,
    /// Today's wins
    #[arg(long)]
    wins: String,
    /// What was hard
    #[arg(long, default_value = "")]
    challenges: String,
    /// Plan for tomorrow
    #[arg(long, default_value = "")]
    tomorrow: String,
    /// Mood rating 1-5 (0 = not rated)
    #[arg(long, default_value_t = 0)]
    mood: u8,
    /// Energy rating 1-5 (0 = not rated)
    #[arg(long, default_value_t = 0)]
    energy: u8,
}

pub fn run(args: ReflectArgs, config: &Config) -> CliResult {
    let mut session = open_session(config)?;
    let reflection = Reflection {
        mood: args.mood,
        energy: args.energy,
        gratitude: args.gratitude,
        wins: args.wins,
        challenges: args.challenges,
        tomorrow: args.tomorrow,
    };
    let applied = session.submit_reflection(&reflection, today())?;
    finish(&mut session, applied)
}
