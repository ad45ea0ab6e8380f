use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "habitforge")]
#[command(about = "Habit tracking with XP, levels, streaks, stats and badges")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.habitforge/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the state file (overrides storage.data_file)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, stats and today's progress
    Status {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage habits
    #[command(subcommand)]
    Habit(cli::habit::HabitCommand),

    /// Manage stats
    #[command(subcommand)]
    Stat(cli::stat::StatCommand),

    /// Check off a habit for today
    Complete {
        /// Habit id (see `habit list`)
        habit_id: String,
    },

    /// Undo today's check-off (earned XP is kept)
    Uncomplete {
        /// Habit id (see `habit list`)
        habit_id: String,
    },

    /// Show completion history
    History {
        #[arg(value_enum, default_value_t = cli::history::Period::Week)]
        period: cli::history::Period,
    },

    /// List badges and which are unlocked
    Badges,

    /// Erase all XP, stats, badges, habits and history
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Initialize a new ~/.habitforge/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::Init { force }) = cli.command {
        return cli::init::init_command(cli.config.as_deref(), force);
    }

    let ctx = cli::Context::load(cli.config.as_deref(), cli.data.as_deref())?;

    match cli.command {
        Some(Commands::Status { json }) => cli::status::status_command(&ctx, json)?,
        Some(Commands::Habit(cmd)) => cli::habit::habit_command(&ctx, cmd)?,
        Some(Commands::Stat(cmd)) => cli::stat::stat_command(&ctx, cmd)?,
        Some(Commands::Complete { habit_id }) => cli::track::complete_command(&ctx, &habit_id)?,
        Some(Commands::Uncomplete { habit_id }) => {
            cli::track::uncomplete_command(&ctx, &habit_id)?
        }
        Some(Commands::History { period }) => cli::history::history_command(&ctx, period)?,
        Some(Commands::Badges) => cli::badges::badges_command(&ctx)?,
        Some(Commands::Reset { yes }) => cli::reset::reset_command(&ctx, yes)?,
        Some(Commands::Init { .. }) => {}
        None => cli::status::status_command(&ctx, false)?,
    }

    Ok(())
}
