//! Per-flavor artifact loaders.
//!
//! A loader locates the serialized model inside the artifact directory and
//! reads it into a [`LoadedModel`]. A missing or ambiguous candidate file is
//! the named, recoverable [`Error::ArtifactLayoutInvalid`], never a generic
//! fault. Whether tensor names are populated is a per-flavor semantic:
//! script formats are self-describing, graph formats are not.

use std::fs;
use std::path::{Path, PathBuf};

use super::LoadedModel;
use crate::error::{Error, Result};

fn layout_error(flavor: &str, reason: impl Into<String>) -> Error {
    Error::ArtifactLayoutInvalid {
        flavor: flavor.to_string(),
        reason: reason.into(),
    }
}

/// Finds exactly one file with the given extension directly under `dir`.
fn single_file_with_extension(dir: &Path, extension: &str, flavor: &str) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == extension) {
            candidates.push(path);
        }
    }
    match candidates.len() {
        0 => Err(layout_error(
            flavor,
            format!("no `.{}` file found under {}", extension, dir.display()),
        )),
        1 => Ok(candidates.remove(0)),
        _ => {
            candidates.sort();
            let names: Vec<String> = candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            Err(layout_error(
                flavor,
                format!(
                    "ambiguous `.{}` candidates under {}: [{}]",
                    extension,
                    dir.display(),
                    names.join(", ")
                ),
            ))
        }
    }
}

/// Reads a list of strings from a flavor-config key, if present.
fn name_list(config: &serde_yaml::Value, key: &str) -> Option<Vec<String>> {
    let entries = config.get(key)?.as_sequence()?;
    Some(
        entries
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
    )
}

/// TorchScript programs: a single `.pt` file at the artifact root. The
/// program carries its own signature, so tensor names stay absent.
pub fn torchscript(root: &Path, _config: &serde_yaml::Value) -> Result<LoadedModel> {
    let path = single_file_with_extension(root, "pt", "pytorch")?;
    Ok(LoadedModel {
        blob: fs::read(path)?,
        inputs: None,
        outputs: None,
    })
}

/// TensorFlow graphs: the flavor config names a `saved_model_dir` holding a
/// single `.pb` graph, and records the `inputs`/`outputs` tensor names the
/// packaging step observed; the serving store cannot run a TF graph without
/// them.
pub fn tensorflow(root: &Path, config: &serde_yaml::Value) -> Result<LoadedModel> {
    let saved_model_dir = config
        .get("saved_model_dir")
        .and_then(|v| v.as_str())
        .ok_or_else(|| layout_error("tensorflow", "flavor config is missing `saved_model_dir`"))?;
    let graph = single_file_with_extension(&root.join(saved_model_dir), "pb", "tensorflow")?;
    let inputs = name_list(config, "inputs")
        .ok_or_else(|| layout_error("tensorflow", "flavor config is missing the `inputs` tensor names"))?;
    let outputs = name_list(config, "outputs")
        .ok_or_else(|| layout_error("tensorflow", "flavor config is missing the `outputs` tensor names"))?;
    Ok(LoadedModel {
        blob: fs::read(graph)?,
        inputs: Some(inputs),
        outputs: Some(outputs),
    })
}

/// ONNX graphs: a single `.onnx` file at the artifact root; tensor names may
/// optionally be recorded in the flavor config.
pub fn onnx(root: &Path, config: &serde_yaml::Value) -> Result<LoadedModel> {
    let path = single_file_with_extension(root, "onnx", "onnx")?;
    Ok(LoadedModel {
        blob: fs::read(path)?,
        inputs: name_list(config, "inputs"),
        outputs: name_list(config, "outputs"),
    })
}
