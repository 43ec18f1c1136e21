use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::StoreOverrides;

#[derive(Subcommand)]
pub enum Commands {
    /// Deploy a packaged model artifact under a new key
    Deploy(DeployCommand),
    /// Re-deploy a model artifact over an existing key
    Update(UpdateCommand),
    /// Remove a deployed model (succeeds even if the key is absent)
    Delete(KeyCommand),
    /// Show metadata for a deployed model
    Get(KeyCommand),
    /// List every deployed model key
    List(ListCommand),
}

impl Commands {
    pub fn logging(&self) -> &LoggingArgs {
        match self {
            Commands::Deploy(cmd) => &cmd.logging,
            Commands::Update(cmd) => &cmd.logging,
            Commands::Delete(cmd) => &cmd.logging,
            Commands::Get(cmd) => &cmd.logging,
            Commands::List(cmd) => &cmd.logging,
        }
    }
}

/// Serving-store connection options, shared by every subcommand.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Serving store host address
    #[arg(long)]
    pub host: Option<String>,

    /// Serving store port
    #[arg(long)]
    pub port: Option<u16>,

    /// Serving store username
    #[arg(long)]
    pub username: Option<String>,

    /// Serving store password
    #[arg(long, hide_env_values = true, env = "REDISAI_PASSWORD")]
    pub password: Option<String>,

    /// Serving store database index
    #[arg(long)]
    pub db: Option<i64>,

    /// Path to a configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ConnectionArgs {
    pub fn overrides(&self) -> StoreOverrides {
        StoreOverrides {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            db: self.db,
        }
    }
}

#[derive(Debug, Args)]
pub struct LoggingArgs {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log filter directives
    #[arg(long = "log-filter", env = "REDISAI_DEPLOY_LOG_FILTER")]
    pub log_filter: Option<String>,
}

impl LoggingArgs {
    pub fn get_effective_level(&self) -> &str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Args)]
pub struct DeployCommand {
    /// Key under which the model is published in the serving store
    #[arg(long = "model-key", short = 'k')]
    pub model_key: String,

    /// URI of the packaged model artifact (path, file://, runs:/ or models:/)
    #[arg(long = "model-uri", short = 'u')]
    pub model_uri: String,

    /// Device to serve the model on (CPU or GPU)
    #[arg(long, short = 'd', default_value = "CPU")]
    pub device: String,

    /// Flavor to deploy; auto-selected from the manifest when omitted
    #[arg(long, short = 'f')]
    pub flavor: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Key of the existing deployment to overwrite
    #[arg(long = "model-key", short = 'k')]
    pub model_key: String,

    /// URI of the packaged model artifact
    #[arg(long = "model-uri", short = 'u')]
    pub model_uri: String,

    /// Device to serve the model on (CPU or GPU)
    #[arg(long, short = 'd', default_value = "CPU")]
    pub device: String,

    /// Flavor to deploy; auto-selected from the manifest when omitted
    #[arg(long, short = 'f')]
    pub flavor: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Shared shape for subcommands addressing one deployed key.
#[derive(Debug, Args)]
pub struct KeyCommand {
    /// Key of the deployment
    #[arg(long = "model-key", short = 'k')]
    pub model_key: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub logging: LoggingArgs,
}
