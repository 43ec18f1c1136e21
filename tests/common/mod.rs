//! Shared fixtures: an in-memory serving store and on-disk artifact layouts.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use redisai_deploy::{ModelMeta, ModelStore, PublishRequest, StoreError};

/// What the in-memory store retains for one published key.
#[derive(Debug, Clone)]
pub struct StoredModel {
    pub backend: String,
    pub device: String,
    pub blob: Vec<u8>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// In-memory stand-in for the serving store. Records every call it receives
/// so tests can assert which operations ran, and can be told to fail the
/// next publish.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub models: BTreeMap<String, StoredModel>,
    pub ops: Vec<String>,
    pub fail_publishes: bool,
}

impl ModelStore for MemoryStore {
    fn set_model(&mut self, key: &str, request: &PublishRequest<'_>) -> Result<(), StoreError> {
        self.ops.push(format!("set {}", key));
        if self.fail_publishes {
            return Err(StoreError::new("connection reset by the store"));
        }
        self.models.insert(
            key.to_string(),
            StoredModel {
                backend: request.backend.to_string(),
                device: request.device.to_string(),
                blob: request.blob.to_vec(),
                inputs: request.inputs.map(<[String]>::to_vec).unwrap_or_default(),
                outputs: request.outputs.map(<[String]>::to_vec).unwrap_or_default(),
            },
        );
        Ok(())
    }

    fn delete_model(&mut self, key: &str) -> Result<bool, StoreError> {
        self.ops.push(format!("del {}", key));
        Ok(self.models.remove(key).is_some())
    }

    fn model_meta(&mut self, key: &str) -> Result<Option<ModelMeta>, StoreError> {
        self.ops.push(format!("meta {}", key));
        Ok(self.models.get(key).map(|stored| ModelMeta {
            backend: stored.backend.clone(),
            device: stored.device.clone(),
            tag: None,
            batchsize: 0,
            minbatchsize: 0,
            inputs: stored.inputs.clone(),
            outputs: stored.outputs.clone(),
        }))
    }

    fn list_models(&mut self) -> Result<Vec<String>, StoreError> {
        self.ops.push("scan".to_string());
        Ok(self.models.keys().cloned().collect())
    }
}

fn write_manifest(dir: &Path, body: &str) {
    fs::write(dir.join("MLmodel"), body).unwrap();
}

/// Artifact packaged under the pytorch flavor: manifest + one `.pt` file.
pub fn pytorch_artifact(blob: &[u8]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "flavors:\n  pytorch:\n    model_data: model.pt\n  python_function:\n    loader_module: mlflow.pytorch\n",
    );
    fs::write(dir.path().join("model.pt"), blob).unwrap();
    dir
}

/// Artifact declaring only flavors the registry does not support.
pub fn unsupported_artifact() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "flavors:\n  sklearn:\n    pickled_model: model.pkl\n",
    );
    dir
}

/// Artifact packaged under the tensorflow flavor.
pub fn tensorflow_artifact(blob: &[u8]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "flavors:\n  tensorflow:\n    saved_model_dir: tfmodel\n    inputs: [x]\n    outputs: [y]\n",
    );
    let saved = dir.path().join("tfmodel");
    fs::create_dir(&saved).unwrap();
    fs::write(saved.join("saved_model.pb"), blob).unwrap();
    dir
}

/// URI form of a fixture directory, as the CLI would pass it.
pub fn uri(dir: &TempDir) -> String {
    dir.path().to_str().unwrap().to_string()
}
