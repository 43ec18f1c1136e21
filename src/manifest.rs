//! Model artifact manifest reading.
//!
//! Every packaged artifact carries an `MLmodel` YAML file at its root that
//! declares the flavors it was saved under. The manifest is read once per
//! deployment operation and is immutable afterwards; each flavor's
//! configuration stays opaque here and is only handed to that flavor's loader.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the manifest file at the artifact root.
pub const MANIFEST_FILE: &str = "MLmodel";

#[derive(Debug, Deserialize)]
struct RawManifest {
    flavors: BTreeMap<String, serde_yaml::Value>,
}

/// A parsed model-artifact manifest.
#[derive(Debug)]
pub struct ModelManifest {
    flavors: BTreeMap<String, serde_yaml::Value>,
    root: PathBuf,
}

impl ModelManifest {
    /// Reads the manifest from the artifact directory at `root`.
    ///
    /// Fails with [`Error::ManifestMissing`] when no manifest file exists and
    /// with [`Error::ManifestCorrupt`] when the file does not parse into a
    /// document with a `flavors` mapping.
    pub fn read(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(Error::ManifestMissing { path });
        }
        let contents = fs::read_to_string(&path)?;
        let raw: RawManifest =
            serde_yaml::from_str(&contents).map_err(|e| Error::ManifestCorrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            flavors: raw.flavors,
            root: root.to_path_buf(),
        })
    }

    /// The artifact directory this manifest was read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the artifact declares the given flavor.
    pub fn declares(&self, flavor: &str) -> bool {
        self.flavors.contains_key(flavor)
    }

    /// All flavor names the artifact declares, in manifest key order.
    pub fn declared_flavors(&self) -> Vec<String> {
        self.flavors.keys().cloned().collect()
    }

    /// The opaque configuration recorded for a declared flavor.
    pub fn flavor_config(&self, flavor: &str) -> Option<&serde_yaml::Value> {
        self.flavors.get(flavor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_manifest_is_a_named_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelManifest::read(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ManifestMissing { .. }));
    }

    #[test]
    fn unparseable_manifest_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), ":\n  - not yaml {").unwrap();
        let err = ModelManifest::read(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ManifestCorrupt { .. }));
    }

    #[test]
    fn manifest_without_flavors_mapping_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "artifact_path: model\n").unwrap();
        let err = ModelManifest::read(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ManifestCorrupt { .. }));
    }

    #[test]
    fn flavors_and_configs_are_exposed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            "flavors:\n  pytorch:\n    model_data: model.pt\n  python_function:\n    loader_module: mlflow.pytorch\n",
        )
        .unwrap();
        let manifest = ModelManifest::read(dir.path()).unwrap();
        assert!(manifest.declares("pytorch"));
        assert!(!manifest.declares("tensorflow"));
        assert_eq!(
            manifest.declared_flavors(),
            vec!["python_function".to_string(), "pytorch".to_string()]
        );
        let config = manifest.flavor_config("pytorch").unwrap();
        assert_eq!(
            config.get("model_data").and_then(|v| v.as_str()),
            Some("model.pt")
        );
    }
}
