//! Ledge CLI - Command-line interface for the Ledge platformer

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, replay, validate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ledge")]
#[command(about = "Level validation and headless replay for the Ledge platformer", long_about = None)]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a level file
    Validate {
        /// Path to level file (.json or .toml)
        level: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Run the game policy over a recorded frame trace
    Replay {
        /// Path to level file (.json or .toml)
        level: String,

        /// Path to trace file (.json or .toml)
        trace: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Tuning file to use instead of the layered config
        #[arg(long)]
        tuning: Option<String>,
    },

    /// Print the resolved tuning
    Config {
        /// Read this file instead of the layered config
        #[arg(long)]
        file: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate { level, format } => validate::run(&level, &format),
        Commands::Replay {
            level,
            trace,
            format,
            tuning,
        } => replay::run(replay::ReplayArgs {
            level,
            trace,
            format,
            tuning,
        }),
        Commands::Config { file } => config::run(file.as_deref()),
    }
}
