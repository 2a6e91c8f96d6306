use growthtree_core::Config;

use super::{finish, open_session, today, CliResult};

pub fn run(yes: bool, config: &Config) -> CliResult {
    if !yes {
        return Err("reset clears all progress; pass --yes to confirm".into());
    }
    let mut session = open_session(config)?;
    let applied = session.reset_tree(today());
    finish(&mut session, applied.map_value(|()| "tree reset"))
}
