use clap::{Parser, Subcommand};
use growthtree_core::Config;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "growthtree", version, about = "GrowthTree CLI")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tree, level, streak and weekly challenge at a glance
    Status,
    /// Strongest/weakest areas, trend and motivation
    Insights,
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Take a small action to grow the tree
    Action(commands::action::ActionArgs),
    /// Record a mood/energy/stress check-in
    Checkin(commands::checkin::CheckinArgs),
    /// Submit an end-of-day reflection
    Reflect(commands::reflect::ReflectArgs),
    /// Onboarding profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Reset the tree: clears progress, habits, goals and profile
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Load the config and start logging at its level. A broken config file
/// falls back to defaults.
fn load_config() -> Config {
    let loaded = Config::load();
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    logging::init(&level);
    loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default configuration");
        Config::default()
    })
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Completions { shell } => commands::completions::run(shell),
        Commands::Config { action } => {
            logging::init(DEFAULT_LOG_LEVEL);
            commands::config::run(action)
        }
        command => run(command, &load_config()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> commands::CliResult {
    match command {
        Commands::Status => commands::status::run(config),
        Commands::Insights => commands::insights::run(config),
        Commands::Habit { action } => commands::habit::run(action, config),
        Commands::Goal { action } => commands::goal::run(action, config),
        Commands::Action(args) => commands::action::run(args, config),
        Commands::Checkin(args) => commands::checkin::run(args, config),
        Commands::Reflect(args) => commands::reflect::run(args, config),
        Commands::Profile { action } => commands::profile::run(action, config),
        Commands::Reset { yes } => commands::reset::run(yes, config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}
