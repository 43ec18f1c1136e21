use anyhow::{Context, Result};

use super::commands::{Commands, ConnectionArgs};
use crate::artifacts::LocalArtifactStore;
use crate::config::StoreConfig;
use crate::deploy::DeploymentOrchestrator;
use crate::flavor::FlavorRegistry;
use crate::store::RedisModelStore;

fn orchestrator<'r>(
    registry: &'r FlavorRegistry,
    connection: &ConnectionArgs,
) -> Result<DeploymentOrchestrator<'r, RedisModelStore, LocalArtifactStore>> {
    let config = StoreConfig::load(connection.config.as_deref(), &connection.overrides())
        .context("failed to load serving store configuration")?;
    let store = RedisModelStore::connect(&config)
        .with_context(|| format!("failed to connect to serving store at {}:{}", config.host, config.port))?;
    Ok(DeploymentOrchestrator::new(
        registry,
        LocalArtifactStore::from_env(),
        store,
    ))
}

pub fn handle_command(command: Commands) -> Result<()> {
    let registry = FlavorRegistry::builtin();
    match command {
        Commands::Deploy(cmd) => {
            let mut deployments = orchestrator(&registry, &cmd.connection)?;
            let info = deployments.create(
                &cmd.model_uri,
                &cmd.model_key,
                cmd.flavor.as_deref(),
                &cmd.device,
            )?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Update(cmd) => {
            let mut deployments = orchestrator(&registry, &cmd.connection)?;
            let info = deployments.update(
                &cmd.model_key,
                &cmd.model_uri,
                cmd.flavor.as_deref(),
                &cmd.device,
            )?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Delete(cmd) => {
            let mut deployments = orchestrator(&registry, &cmd.connection)?;
            deployments.delete(&cmd.model_key)?;
            println!("deleted `{}`", cmd.model_key);
        }
        Commands::Get(cmd) => {
            let mut deployments = orchestrator(&registry, &cmd.connection)?;
            let meta = deployments.get(&cmd.model_key)?;
            println!("{}", serde_json::to_string_pretty(&meta)?);
        }
        Commands::List(cmd) => {
            let mut deployments = orchestrator(&registry, &cmd.connection)?;
            for key in deployments.list()? {
                println!("{}", key);
            }
        }
    }
    Ok(())
}
