//! Error types for the deployment service.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;
use std::result;

use crate::store::StoreError;

/// A specialized Result type for deployment operations.
pub type Result<T> = result::Result<T, Error>;

/// The error type for deployment operations.
///
/// Every variant carries the offending identifier and, where one exists, the
/// full set of valid alternatives, so a failure is directly actionable.
#[derive(Debug)]
pub enum Error {
    /// No manifest file at the artifact root
    ManifestMissing { path: PathBuf },
    /// Manifest file exists but cannot be parsed
    ManifestCorrupt { path: PathBuf, reason: String },
    /// The artifact declares no flavor this service can deploy
    UnsupportedModel {
        declared: Vec<String>,
        supported: Vec<String>,
    },
    /// The requested flavor is unknown to the registry
    UnsupportedFlavor {
        flavor: String,
        supported: Vec<String>,
    },
    /// The requested flavor is supported but the artifact does not declare it
    FlavorNotInManifest {
        flavor: String,
        declared: Vec<String>,
    },
    /// The expected serialized file is missing or ambiguous within the artifact
    ArtifactLayoutInvalid { flavor: String, reason: String },
    /// Device value outside {CPU, GPU}
    InvalidDevice { value: String },
    /// Update/get against a key the serving store does not hold
    DeploymentNotFound { key: String },
    /// A serving-store call failed; wraps the underlying client fault
    StorePublishFailed {
        key: Option<String>,
        source: StoreError,
    },
    /// I/O errors (artifact resolution, local file reads)
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ManifestMissing { path } => write!(
                f,
                "no manifest file found at the artifact root: {}",
                path.display()
            ),
            Error::ManifestCorrupt { path, reason } => write!(
                f,
                "manifest file {} could not be parsed: {}",
                path.display(),
                reason
            ),
            Error::UnsupportedModel {
                declared,
                supported,
            } => write!(
                f,
                "the model does not contain any flavor supported for deployment; \
                 model flavors: [{}], supported flavors: [{}]",
                declared.join(", "),
                supported.join(", ")
            ),
            Error::UnsupportedFlavor { flavor, supported } => write!(
                f,
                "flavor `{}` is not supported for deployment; supported flavors: [{}]",
                flavor,
                supported.join(", ")
            ),
            Error::FlavorNotInManifest { flavor, declared } => write!(
                f,
                "the model does not contain the `{}` flavor; model flavors: [{}]",
                flavor,
                declared.join(", ")
            ),
            Error::ArtifactLayoutInvalid { flavor, reason } => {
                write!(f, "invalid artifact layout for flavor `{}`: {}", flavor, reason)
            }
            Error::InvalidDevice { value } => write!(
                f,
                "invalid device `{}`; expected one of CPU, GPU (case-insensitive)",
                value
            ),
            Error::DeploymentNotFound { key } => {
                write!(f, "no deployment found under key `{}`", key)
            }
            Error::StorePublishFailed { key, source } => match key {
                Some(key) => write!(f, "serving store call failed for key `{}`: {}", key, source),
                None => write!(f, "serving store call failed: {}", source),
            },
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::StorePublishFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
