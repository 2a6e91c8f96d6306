use clap::Subcommand;
use growthtree_core::{Category, Config, Profile};

use super::{finish, open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create or replace the profile
    Set {
        /// Display name
        #[arg(long)]
        name: String,
        /// Primary focus category
        #[arg(long)]
        focus: Category,
        /// Weight, free text (e.g. "70kg")
        #[arg(long)]
        weight: Option<String>,
        /// Height, free text (e.g. "175cm")
        #[arg(long)]
        height: Option<String>,
    },
    /// Show the profile
    Show,
}

pub fn run(action: ProfileAction, config: &Config) -> CliResult {
    let mut session = open_session(config)?;

    match action {
        ProfileAction::Set {
            name,
            focus,
            weight,
            height,
        } => {
            let profile = Profile::new(&name, focus)?.with_measurements(weight, height);
            let applied = session.set_profile(profile);
            finish(&mut session, applied)
        }
        ProfileAction::Show => match session.profile() {
            Some(profile) => print_json(profile),
            None => Err("no profile set; run `growthtree profile set`".into()),
        },
    }
}
