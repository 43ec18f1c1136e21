//! Flavor registry: the packaging conventions this service can deploy.
//!
//! A flavor names a serialization format and directory layout for a trained
//! model. Each supported flavor maps to the serving-store backend its blobs
//! require and to a loader that turns an artifact directory plus the
//! manifest's flavor config into publishable bytes. The registry is an
//! explicit immutable table built at startup and passed by reference into
//! the orchestrator; adding a flavor means adding one descriptor here.

pub mod loaders;
pub mod resolver;

use crate::error::{Error, Result};

/// Loads an artifact directory + flavor config into a publishable model.
pub type FlavorLoader = fn(&std::path::Path, &serde_yaml::Value) -> Result<LoadedModel>;

/// In-memory form of a model ready for publishing.
#[derive(Debug)]
pub struct LoadedModel {
    /// Serialized graph/program bytes
    pub blob: Vec<u8>,
    /// Input tensor names; absent for self-describing formats
    pub inputs: Option<Vec<String>>,
    /// Output tensor names; absent for self-describing formats
    pub outputs: Option<Vec<String>>,
}

/// One supported flavor: its name, required backend and loader.
#[derive(Debug, Clone)]
pub struct FlavorDescriptor {
    pub name: &'static str,
    /// Serving-store execution-engine tag for blobs of this flavor
    pub backend: &'static str,
    pub loader: FlavorLoader,
}

/// Immutable table of supported flavors.
///
/// Descriptor order is the deterministic priority used when an artifact
/// declares several supported flavors.
#[derive(Debug, Clone)]
pub struct FlavorRegistry {
    descriptors: Vec<FlavorDescriptor>,
}

impl FlavorRegistry {
    /// Builds a registry from descriptors; their order becomes the priority.
    pub fn new(descriptors: Vec<FlavorDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The built-in flavors in default priority order.
    pub fn builtin() -> Self {
        Self::new(vec![
            FlavorDescriptor {
                name: "pytorch",
                backend: "TORCH",
                loader: loaders::torchscript,
            },
            FlavorDescriptor {
                name: "tensorflow",
                backend: "TF",
                loader: loaders::tensorflow,
            },
            FlavorDescriptor {
                name: "onnx",
                backend: "ONNX",
                loader: loaders::onnx,
            },
        ])
    }

    /// Reorders the table to the given priority. Every name must be
    /// supported; names not listed keep their relative order after the
    /// listed ones.
    pub fn with_priority(mut self, order: &[&str]) -> Result<Self> {
        for name in order {
            if self.lookup(name).is_none() {
                return Err(Error::UnsupportedFlavor {
                    flavor: name.to_string(),
                    supported: self.supported_names(),
                });
            }
        }
        let position = |d: &FlavorDescriptor| {
            order
                .iter()
                .position(|name| *name == d.name)
                .unwrap_or(order.len())
        };
        self.descriptors.sort_by_key(position);
        Ok(self)
    }

    pub fn lookup(&self, name: &str) -> Option<&FlavorDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Supported flavor names in priority order.
    pub fn supported_names(&self) -> Vec<String> {
        self.descriptors.iter().map(|d| d.name.to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlavorDescriptor> {
        self.descriptors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_knows_its_flavors() {
        let registry = FlavorRegistry::builtin();
        assert_eq!(registry.lookup("pytorch").unwrap().backend, "TORCH");
        assert_eq!(registry.lookup("tensorflow").unwrap().backend, "TF");
        assert_eq!(registry.lookup("onnx").unwrap().backend, "ONNX");
        assert!(registry.lookup("tflite").is_none());
    }

    #[test]
    fn priority_can_be_reordered() {
        let registry = FlavorRegistry::builtin()
            .with_priority(&["onnx", "tensorflow"])
            .unwrap();
        assert_eq!(
            registry.supported_names(),
            vec!["onnx", "tensorflow", "pytorch"]
        );
    }

    #[test]
    fn unknown_priority_name_is_rejected() {
        let err = FlavorRegistry::builtin()
            .with_priority(&["tflite"])
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFlavor { .. }));
    }
}
