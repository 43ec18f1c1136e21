//! Deployment orchestration against the serving store.
//!
//! Composes the artifact resolver, manifest reader, flavor registry and
//! store client into the key-lifecycle operations. Each operation is one
//! synchronous sequence of blocking calls with no retries and no local
//! state: the serving store is the sole owner of a published model, and
//! flavor resolution either fully fails before any store call or the store
//! call itself fails with nothing changed locally.

use serde::Serialize;
use tracing::{debug, info};

use crate::artifacts::ArtifactResolver;
use crate::error::{Error, Result};
use crate::flavor::{resolver, FlavorRegistry};
use crate::manifest::ModelManifest;
use crate::store::{Device, ModelMeta, ModelStore, PublishRequest, StoreError};

/// Outcome of a create/update: the published key and the flavor used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentInfo {
    pub deployment_id: String,
    pub flavor: String,
}

/// Stateless façade implementing create/update/delete/get/list.
pub struct DeploymentOrchestrator<'r, S, A> {
    registry: &'r FlavorRegistry,
    artifacts: A,
    store: S,
}

impl<'r, S: ModelStore, A: ArtifactResolver> DeploymentOrchestrator<'r, S, A> {
    pub fn new(registry: &'r FlavorRegistry, artifacts: A, store: S) -> Self {
        Self {
            registry,
            artifacts,
            store,
        }
    }

    fn store_failure(key: &str) -> impl FnOnce(StoreError) -> Error + '_ {
        move |source| Error::StorePublishFailed {
            key: Some(key.to_string()),
            source,
        }
    }

    /// Publishes the artifact at `model_uri` under `key`.
    ///
    /// When `flavor` is unset the preferred flavor is resolved from the
    /// manifest; otherwise the choice is validated. The device string is
    /// translated after the model is loaded, and any store fault surfaces
    /// unchanged as [`Error::StorePublishFailed`].
    pub fn create(
        &mut self,
        model_uri: &str,
        key: &str,
        flavor: Option<&str>,
        device: &str,
    ) -> Result<DeploymentInfo> {
        let root = self.artifacts.resolve(model_uri)?;
        let manifest = ModelManifest::read(&root)?;

        let descriptor = match flavor {
            None => resolver::resolve_preferred(self.registry, &manifest)?,
            Some(requested) => resolver::validate(self.registry, &manifest, requested)?,
        };
        info!(key, "using the {} flavor for deployment", descriptor.name);

        let config = manifest
            .flavor_config(descriptor.name)
            .cloned()
            .unwrap_or(serde_yaml::Value::Null);
        let loaded = (descriptor.loader)(manifest.root(), &config)?;
        let device = Device::parse(device)?;

        let request = PublishRequest {
            backend: descriptor.backend,
            device,
            blob: &loaded.blob,
            inputs: loaded.inputs.as_deref(),
            outputs: loaded.outputs.as_deref(),
        };
        self.store
            .set_model(key, &request)
            .map_err(Self::store_failure(key))?;
        info!(key, backend = descriptor.backend, %device, "model published");

        Ok(DeploymentInfo {
            deployment_id: key.to_string(),
            flavor: descriptor.name.to_string(),
        })
    }

    /// Re-publishes over an existing key.
    ///
    /// Probes the key with a metadata-only fetch first and fails with
    /// [`Error::DeploymentNotFound`] when absent: update never silently
    /// creates. The overwrite is only as atomic as the store's own set
    /// operation.
    pub fn update(
        &mut self,
        key: &str,
        model_uri: &str,
        flavor: Option<&str>,
        device: &str,
    ) -> Result<DeploymentInfo> {
        let existing = self
            .store
            .model_meta(key)
            .map_err(Self::store_failure(key))?;
        if existing.is_none() {
            return Err(Error::DeploymentNotFound {
                key: key.to_string(),
            });
        }
        self.create(model_uri, key, flavor, device)
    }

    /// Removes the model under `key`. Deleting an absent key is a no-op
    /// success: delete is idempotent by policy, not by accident of the
    /// store client's error surface.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let existed = self
            .store
            .delete_model(key)
            .map_err(Self::store_failure(key))?;
        if existed {
            info!(key, "deleted model");
        } else {
            debug!(key, "delete of absent key treated as success");
        }
        Ok(())
    }

    /// Metadata-only fetch for `key`; never transfers the blob.
    pub fn get(&mut self, key: &str) -> Result<ModelMeta> {
        self.store
            .model_meta(key)
            .map_err(Self::store_failure(key))?
            .ok_or_else(|| Error::DeploymentNotFound {
                key: key.to_string(),
            })
    }

    /// Every key currently published in the store.
    pub fn list(&mut self) -> Result<Vec<String>> {
        self.store
            .list_models()
            .map_err(|source| Error::StorePublishFailed { key: None, source })
    }
}
