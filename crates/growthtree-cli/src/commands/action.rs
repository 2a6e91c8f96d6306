use clap::Args;
use growthtree_core::{entropy_rng, seeded_rng, Category, Config};

use super::{finish, open_session, today, CliResult};

#[derive(Args)]
pub struct ActionArgs {
    /// Focus category; defaults to the profile's primary focus
    #[arg(long)]
    focus: Option<Category>,
    /// Seed for reproducible category, suggestion and XP picks
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: ActionArgs, config: &Config) -> CliResult {
    let mut session = open_session(config)?;
    let mut rng = match args.seed {
        Some(seed) => seeded_rng(seed),
        None => entropy_rng(),
    };
    let applied = session.record_action(args.focus, &mut rng, today());
    finish(&mut session, applied)
}
