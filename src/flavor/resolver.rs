//! Flavor selection and validation against a manifest.

use tracing::info;

use super::{FlavorDescriptor, FlavorRegistry};
use crate::error::{Error, Result};
use crate::manifest::ModelManifest;

/// Picks the flavor to deploy when the caller did not name one.
///
/// Intersects the manifest's declared flavors with the registry's supported
/// set. A single match is returned as-is; several matches are decided by the
/// registry's priority order (not manifest order), deterministically; zero
/// matches reports both sets for diagnostics.
pub fn resolve_preferred<'r>(
    registry: &'r FlavorRegistry,
    manifest: &ModelManifest,
) -> Result<&'r FlavorDescriptor> {
    let candidates: Vec<&FlavorDescriptor> = registry
        .iter()
        .filter(|d| manifest.declares(d.name))
        .collect();
    match candidates.as_slice() {
        [] => Err(Error::UnsupportedModel {
            declared: manifest.declared_flavors(),
            supported: registry.supported_names(),
        }),
        [only] => Ok(*only),
        [first, ..] => {
            info!(
                flavor = first.name,
                candidates = candidates.len(),
                "model declares multiple deployable flavors; picked the highest-priority one"
            );
            Ok(*first)
        }
    }
}

/// Validates a caller-supplied flavor choice against registry and manifest.
pub fn validate<'r>(
    registry: &'r FlavorRegistry,
    manifest: &ModelManifest,
    flavor: &str,
) -> Result<&'r FlavorDescriptor> {
    let descriptor = registry.lookup(flavor).ok_or_else(|| Error::UnsupportedFlavor {
        flavor: flavor.to_string(),
        supported: registry.supported_names(),
    })?;
    if !manifest.declares(flavor) {
        return Err(Error::FlavorNotInManifest {
            flavor: flavor.to_string(),
            declared: manifest.declared_flavors(),
        });
    }
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::MANIFEST_FILE;
    use std::fs;

    fn manifest_with(flavors: &[&str]) -> (tempfile::TempDir, ModelManifest) {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = String::from("flavors:\n");
        for flavor in flavors {
            doc.push_str(&format!("  {}: {{}}\n", flavor));
        }
        fs::write(dir.path().join(MANIFEST_FILE), doc).unwrap();
        let manifest = ModelManifest::read(dir.path()).unwrap();
        (dir, manifest)
    }

    #[test]
    fn a_single_supported_flavor_is_returned() {
        let registry = FlavorRegistry::builtin();
        let (_dir, manifest) = manifest_with(&["python_function", "onnx"]);
        assert_eq!(resolve_preferred(&registry, &manifest).unwrap().name, "onnx");
    }

    #[test]
    fn zero_supported_flavors_reports_both_sets() {
        let registry = FlavorRegistry::builtin();
        let (_dir, manifest) = manifest_with(&["python_function", "sklearn"]);
        match resolve_preferred(&registry, &manifest).unwrap_err() {
            Error::UnsupportedModel {
                declared,
                supported,
            } => {
                assert_eq!(declared, vec!["python_function", "sklearn"]);
                assert_eq!(supported, vec!["pytorch", "tensorflow", "onnx"]);
            }
            other => panic!("expected UnsupportedModel, got {other:?}"),
        }
    }

    #[test]
    fn multiple_matches_follow_registry_priority_deterministically() {
        let registry = FlavorRegistry::builtin();
        let (_dir, manifest) = manifest_with(&["onnx", "pytorch", "tensorflow"]);
        for _ in 0..10 {
            assert_eq!(
                resolve_preferred(&registry, &manifest).unwrap().name,
                "pytorch"
            );
        }

        let reordered = FlavorRegistry::builtin()
            .with_priority(&["tensorflow"])
            .unwrap();
        assert_eq!(
            resolve_preferred(&reordered, &manifest).unwrap().name,
            "tensorflow"
        );
    }

    #[test]
    fn validate_rejects_unknown_flavors_regardless_of_manifest() {
        let registry = FlavorRegistry::builtin();
        let (_dir, manifest) = manifest_with(&["sklearn"]);
        let err = validate(&registry, &manifest, "sklearn").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFlavor { .. }));
    }

    #[test]
    fn validate_rejects_flavors_the_artifact_lacks() {
        let registry = FlavorRegistry::builtin();
        let (_dir, manifest) = manifest_with(&["pytorch"]);
        match validate(&registry, &manifest, "tensorflow").unwrap_err() {
            Error::FlavorNotInManifest { flavor, declared } => {
                assert_eq!(flavor, "tensorflow");
                assert_eq!(declared, vec!["pytorch"]);
            }
            other => panic!("expected FlavorNotInManifest, got {other:?}"),
        }
    }

    #[test]
    fn validate_returns_the_descriptor_on_success() {
        let registry = FlavorRegistry::builtin();
        let (_dir, manifest) = manifest_with(&["pytorch"]);
        assert_eq!(validate(&registry, &manifest, "pytorch").unwrap().backend, "TORCH");
    }
}
