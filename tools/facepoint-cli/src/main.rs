//! Facepoint CLI: hands-free pointer control from face landmarks.
//!
//! Usage:
//!   facepoint run [OPTIONS]    Drive the pointer from a landmark feed
//!   facepoint check            Check system capabilities
//!   facepoint config           Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use facepoint_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "facepoint",
    about = "Control the mouse pointer with your face: nose to move, blinks to click",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to the XDG config location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a gesture session
    Run {
        /// Landmark feed (JSONL); `-` or omitted reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Do not move the real pointer; record calls in memory only
        #[arg(long)]
        dry_run: bool,

        /// Append every dispatched action to this JSONL file
        #[arg(long)]
        record_actions: Option<PathBuf>,

        /// Cursor smoothing factor in (0, 1)
        #[arg(long)]
        smooth_factor: Option<f64>,

        /// Mirror landmarks horizontally (unmirrored camera image)
        #[arg(long)]
        mirror: bool,

        /// Screen size as WIDTHxHEIGHT (detected when omitted)
        #[arg(long, value_parser = commands::run::parse_screen)]
        screen: Option<(u32, u32)>,
    },

    /// Check system capabilities
    Check,

    /// Print the effective configuration as JSON
    Config,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display())),
        None => Ok(AppConfig::load()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    facepoint_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Run {
            input,
            dry_run,
            record_actions,
            smooth_factor,
            mirror,
            screen,
        } => {
            let options = commands::run::RunOptions {
                input,
                dry_run,
                record_actions,
                smooth_factor,
                mirror,
                screen,
            };
            commands::run::run(config, options).await
        }
        Commands::Check => commands::check::run(),
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
    }
}
