//! Payload sources: where raw transit API responses come from.
//!
//! The HTTP transport lives outside this crate. [`PayloadSource`] is the
//! seam it plugs into, and [`FixtureSource`] serves recorded responses
//! from disk for tests and the command-line tool.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

/// Errors from loading or fetching payloads.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no payload files found in {}", .0.display())]
    Empty(PathBuf),

    #[error("no payload for endpoint {endpoint:?} (available: {})", available.join(", "))]
    UnknownEndpoint {
        endpoint: String,
        available: Vec<String>,
    },
}

/// Something that can produce the raw JSON response for an endpoint.
pub trait PayloadSource {
    /// Fetch the response for an endpoint name such as `trip-planner`.
    fn fetch(&self, endpoint: &str) -> Result<Value, SourceError>;
}

/// Serves payloads recorded as `{endpoint}.json` files in a directory.
///
/// Files are read and parsed once, at construction.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    payloads: HashMap<String, Value>,
}

impl FixtureSource {
    /// Load every `.json` file in `dir`. Other files are skipped.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref();
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| SourceError::Io { path, source }
        };

        let mut payloads = HashMap::new();
        for entry in std::fs::read_dir(dir).map_err(io_error(dir))? {
            let path = entry.map_err(io_error(dir))?.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(endpoint) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let bytes = std::fs::read(&path).map_err(io_error(&path))?;
            let value: Value = serde_json::from_slice(&bytes).map_err(|source| SourceError::Json {
                path: path.clone(),
                source,
            })?;

            debug!(endpoint, path = %path.display(), "loaded fixture");
            payloads.insert(endpoint.to_string(), value);
        }

        if payloads.is_empty() {
            return Err(SourceError::Empty(dir.to_path_buf()));
        }

        Ok(Self { payloads })
    }

    /// Returns the names of the endpoints with recorded payloads, sorted.
    pub fn endpoints(&self) -> Vec<&str> {
        let mut endpoints: Vec<&str> = self.payloads.keys().map(String::as_str).collect();
        endpoints.sort_unstable();
        endpoints
    }
}

impl PayloadSource for FixtureSource {
    fn fetch(&self, endpoint: &str) -> Result<Value, SourceError> {
        self.payloads
            .get(endpoint)
            .cloned()
            .ok_or_else(|| SourceError::UnknownEndpoint {
                endpoint: endpoint.to_string(),
                available: self.endpoints().into_iter().map(String::from).collect(),
            })
    }
}
