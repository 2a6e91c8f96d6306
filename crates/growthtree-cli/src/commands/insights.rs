use growthtree_core::{Config, Insights};

use super::{open_session, print_json, CliResult};

pub fn run(config: &Config) -> CliResult {
    let session = open_session(config)?;
    print_json(&Insights::from_store(session.store()))
}
