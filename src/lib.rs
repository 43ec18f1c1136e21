//! Bridge between a model-tracking artifact repository and a RedisAI-style
//! tensor-model serving store: resolve an artifact's packaging flavor, load
//! the serialized graph the store expects, and manage the published key's
//! lifecycle (create, update, delete, get, list).

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod flavor;
pub mod manifest;
pub mod store;

// Re-export commonly used types
pub use artifacts::{ArtifactResolver, LocalArtifactStore};
pub use config::StoreConfig;
pub use deploy::{DeploymentInfo, DeploymentOrchestrator};
pub use error::{Error, Result};
pub use flavor::FlavorRegistry;
pub use manifest::ModelManifest;
pub use store::{Device, ModelMeta, ModelStore, PublishRequest, RedisModelStore, StoreError};
