use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod chime;
mod commands;

#[derive(Parser)]
#[command(name = "salah", version, about = "Daily prayer countdown and rewards")]
struct Cli {
    /// Use this config file instead of ~/.config/salah/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the five prayers and their units
    Prayers(commands::prayers::PrayersArgs),
    /// Countdown to the next prayer
    Next(commands::ScheduleArgs),
    /// Full session snapshot
    Status(commands::ScheduleArgs),
    /// Live countdown; type `done <prayer>` to mark prayers as completed
    Watch(commands::watch::WatchArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let default_level = match cli.command {
        Commands::Watch(_) => "info",
        _ => "warn",
    };
    init_logging(default_level);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Prayers(args) => commands::prayers::run(args),
        Commands::Next(args) => commands::next::run_next(args, config),
        Commands::Status(args) => commands::next::run_status(args, config),
        Commands::Watch(args) => commands::watch::run(args, config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
