//! redisai-deploy binary.
//!
//! This binary provides the command-line entry point for deploying packaged
//! model artifacts to a RedisAI serving store and managing the keys they are
//! published under.

use clap::Parser;
use redisai_deploy::cli::{handle_command, Commands};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

fn main() {
    let cli = Cli::parse();

    // Get logging config from command
    let logging = cli.command.logging();
    let level = logging.get_effective_level();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.parse().unwrap_or(Level::INFO).into())
                .parse_lossy(logging.log_filter.as_deref().unwrap_or("redisai_deploy=info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = handle_command(cli.command) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
