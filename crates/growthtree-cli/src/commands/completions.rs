use clap::CommandFactory;
use clap_complete::Shell;

use super::CliResult;

pub fn run(shell: Shell) -> CliResult {
    let mut cmd = crate::Cli::command();
    clap_complete::generate(shell, &mut cmd, "growthtree", &mut std::io::stdout());
    Ok(())
}
