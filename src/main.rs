//! autoru-dump main entry point
//!
//! This is the command-line interface for the auto.ru listing scraper.

use autoru_dump::config::{default_config, load_config, Config};
use autoru_dump::crawler::run_scrape;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// autoru-dump: scrape the auto.ru listing into a spreadsheet
///
/// Walks the paginated used-car listing through a local Tor proxy, rotating
/// circuits whenever the site serves a captcha or block page, and writes the
/// collected records to a timestamped .xlsx file.
#[derive(Parser, Debug)]
#[command(name = "autoru-dump")]
#[command(version = "1.0.0")]
#[command(about = "Scrape the auto.ru listing into a spreadsheet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the listing and save the report
    Start {
        /// Path to a TOML configuration file; built-in defaults otherwise
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Start { config } => {
            let config = resolve_config(config.as_deref())?;
            handle_start(config).await;
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("autoru_dump=info,warn"),
            1 => EnvFilter::new("autoru_dump=debug,info"),
            2 => EnvFilter::new("autoru_dump=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, the defaults otherwise
fn resolve_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            Ok(load_config(path)?)
        }
        None => {
            tracing::debug!("No configuration file given, using built-in defaults");
            Ok(default_config()?)
        }
    }
}

/// Handles the start command: runs the scrape and reports the result
///
/// Any fatal error (exhausted retry budget, structural parse failure, output
/// IO failure) terminates the process with exit code 1 after a diagnostic;
/// no partial report is left behind.
async fn handle_start(config: Config) {
    match run_scrape(&config).await {
        Ok(path) => {
            println!("Saved report to {}", path.display());
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            std::process::exit(1);
        }
    }
}
