//! Artifact repository resolution.
//!
//! The tracking framework publishes trained artifacts under several URI
//! schemes; this layer only needs them as local directories. The resolver is
//! a capability trait so tests can substitute a double, and its failures stay
//! opaque `io::Error`s passed through unchanged.

use std::io;
use std::path::PathBuf;

/// Resolves a model URI to a local artifact directory.
pub trait ArtifactResolver {
    fn resolve(&self, uri: &str) -> io::Result<PathBuf>;
}

/// Environment variable naming the tracking root for `runs:/` and `models:/`
/// references.
pub const TRACKING_ROOT_ENV: &str = "MODEL_TRACKING_ROOT";

/// Resolver for artifacts reachable through the local filesystem.
///
/// Supported URI forms:
/// - absolute or relative paths, and `file://` URIs
/// - `runs:/<run-id>/<relative-path>` resolved under `<root>/runs`
/// - `models:/<name>/<version>` resolved under `<root>/registry`
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    tracking_root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(tracking_root: impl Into<PathBuf>) -> Self {
        Self {
            tracking_root: tracking_root.into(),
        }
    }

    /// Builds a store rooted at `$MODEL_TRACKING_ROOT`, defaulting to the
    /// current directory when unset.
    pub fn from_env() -> Self {
        let root = std::env::var_os(TRACKING_ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    fn checked(&self, path: PathBuf, uri: &str) -> io::Result<PathBuf> {
        if path.is_dir() {
            Ok(path)
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("artifact URI `{}` does not resolve to a directory: {}", uri, path.display()),
            ))
        }
    }
}

impl ArtifactResolver for LocalArtifactStore {
    fn resolve(&self, uri: &str) -> io::Result<PathBuf> {
        if let Some(path) = uri.strip_prefix("file://") {
            return self.checked(PathBuf::from(path), uri);
        }
        if let Some(rest) = uri.strip_prefix("runs:/") {
            return self.checked(self.tracking_root.join("runs").join(rest), uri);
        }
        if let Some(rest) = uri.strip_prefix("models:/") {
            return self.checked(self.tracking_root.join("registry").join(rest), uri);
        }
        self.checked(PathBuf::from(uri), uri)
    }
}
