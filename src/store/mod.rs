//! Serving-store client abstraction.
//!
//! The serving store is a remote key-value system holding published models
//! and executing inference against them. This module defines the capability
//! trait the orchestrator works against, so a test double can stand in for
//! the wire client; the RedisAI implementation lives in [`redis`].

pub mod redis;

use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub use self::redis::RedisModelStore;

/// Execution device for a published model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Gpu,
}

impl Device {
    /// Parses a caller-supplied device string, case-insensitively.
    ///
    /// Anything outside `{CPU, GPU}` (including surrounding whitespace) is
    /// rejected with [`Error::InvalidDevice`].
    pub fn parse(value: &str) -> Result<Self> {
        if value.eq_ignore_ascii_case("cpu") {
            Ok(Device::Cpu)
        } else if value.eq_ignore_ascii_case("gpu") {
            Ok(Device::Gpu)
        } else {
            Err(Error::InvalidDevice {
                value: value.to_string(),
            })
        }
    }

    /// The store's wire spelling of the device.
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Cpu => "CPU",
            Device::Gpu => "GPU",
        }
    }
}

impl FromStr for Device {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Device::parse(s)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the store needs to publish one model under a key.
#[derive(Debug)]
pub struct PublishRequest<'a> {
    /// Execution-engine tag the blob requires (e.g. `TORCH`, `TF`, `ONNX`)
    pub backend: &'a str,
    pub device: Device,
    /// Serialized graph/program
    pub blob: &'a [u8],
    /// Graph input tensor names; absent for self-describing formats
    pub inputs: Option<&'a [String]>,
    /// Graph output tensor names; absent for self-describing formats
    pub outputs: Option<&'a [String]>,
}

/// Metadata the store reports for a published model. Never carries the blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelMeta {
    pub backend: String,
    pub device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub batchsize: u64,
    pub minbatchsize: u64,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Opaque fault raised by a store client. The orchestrator wraps it into
/// [`Error::StorePublishFailed`] without retrying or interpreting it.
#[derive(Debug)]
pub struct StoreError(Box<dyn StdError + Send + Sync>);

impl StoreError {
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref())
    }
}

/// Primitive operations a serving store must expose.
///
/// Existence is modeled in the signatures rather than in error values:
/// implementations normalize the store's own missing-key responses into
/// `Ok(false)` / `Ok(None)` so the orchestrator owns the idempotent-delete
/// and not-found policy.
pub trait ModelStore {
    /// Publishes a model under `key`, overwriting any previous model there.
    fn set_model(&mut self, key: &str, request: &PublishRequest<'_>)
        -> std::result::Result<(), StoreError>;

    /// Removes the model under `key`; returns whether the key existed.
    fn delete_model(&mut self, key: &str) -> std::result::Result<bool, StoreError>;

    /// Metadata-only fetch; `None` when the key is not present.
    fn model_meta(&mut self, key: &str) -> std::result::Result<Option<ModelMeta>, StoreError>;

    /// Every key currently published. Implementations must return the
    /// complete set, exhausting any cursor the backend uses; a partial
    /// listing is a contract violation.
    fn list_models(&mut self) -> std::result::Result<Vec<String>, StoreError>;
}

impl<M: ModelStore + ?Sized> ModelStore for &mut M {
    fn set_model(
        &mut self,
        key: &str,
        request: &PublishRequest<'_>,
    ) -> std::result::Result<(), StoreError> {
        (**self).set_model(key, request)
    }

    fn delete_model(&mut self, key: &str) -> std::result::Result<bool, StoreError> {
        (**self).delete_model(key)
    }

    fn model_meta(&mut self, key: &str) -> std::result::Result<Option<ModelMeta>, StoreError> {
        (**self).model_meta(key)
    }

    fn list_models(&mut self) -> std::result::Result<Vec<String>, StoreError> {
        (**self).list_models()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_parsing_is_case_insensitive() {
        for value in ["cpu", "CPU", "cPu"] {
            assert_eq!(Device::parse(value).unwrap(), Device::Cpu);
        }
        for value in ["gpu", "GPU", "Gpu"] {
            assert_eq!(Device::parse(value).unwrap(), Device::Gpu);
        }
    }

    #[test]
    fn device_parsing_rejects_everything_else() {
        for value in ["tpu", "", "Cpu ", " gpu", "cuda"] {
            let err = Device::parse(value).unwrap_err();
            match err {
                Error::InvalidDevice { value: reported } => assert_eq!(reported, value),
                other => panic!("expected InvalidDevice, got {other:?}"),
            }
        }
    }

    #[test]
    fn device_renders_the_wire_spelling() {
        assert_eq!(Device::Cpu.to_string(), "CPU");
        assert_eq!(Device::Gpu.to_string(), "GPU");
    }
}
