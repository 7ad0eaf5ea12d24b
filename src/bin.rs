//! Binary entry point for `feishu-notify`.
//!
//! This module provides the command-line interface with options for an extra
//! configuration file and logging verbosity. It sends one notification and
//! reports the outcome through the exit status and CI log annotations.

use std::process::ExitCode;

use clap::Parser;
use feishu_notify::base::{config::Config, types::Void};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Feishu-notify – post a CI notification to a Feishu bot webhook.
///
/// Inputs come from `INPUT_*` variables (as set by CI runners for action
/// inputs), falling back to plain variables such as `BOT_TOKEN` and
/// `POST_MESSAGE`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read additional settings from a TOML file (optional).
    ///
    /// Environment variables take precedence over values in the file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point for the feishu-notify binary.
///
/// Sets up logging based on verbosity, loads configuration, and sends the message.
#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry().with(level_filter).with(stdout).init();

    match run(&args).await {
        Ok(()) => {
            println!("::notice::Message sent successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("::error::{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Void {
    let config = Config::load(args.config.as_deref())?;

    feishu_notify::start(config).await
}
