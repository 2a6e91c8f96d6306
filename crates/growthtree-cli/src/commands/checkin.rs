use clap::Args;
use growthtree_core::Config;

use super::{finish, open_session, CliResult};

#[derive(Args)]
pub struct CheckinArgs {
    /// Mood, 0-100
    #[arg(long, allow_negative_numbers = true)]
    mood: i64,
    /// Energy, 0-100
    #[arg(long, allow_negative_numbers = true)]
    energy: i64,
    /// Stress, 0-100
    #[arg(long, allow_negative_numbers = true)]
    stress: i64,
}

pub fn run(args: CheckinArgs, config: &Config) -> CliResult {
    let mut session = open_session(config)?;
    let applied = session.record_checkin(args.mood, args.energy, args.stress)?;
    finish(&mut session, applied)
}
