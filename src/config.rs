//! Configuration document model for clusterkit.
//!
//! The configuration source is a YAML document keyed at the top level by a
//! schema version symbol. Only the recognized version key is consumed;
//! unknown top-level keys are ignored. Under the version key, each entry
//! names one cluster:
//!
//! ```yaml
//! v1:
//!   owens:
//!     title: "Owens"
//!     hpc_cluster: true
//!     validators:
//!       group:
//!         type: "group_validator"
//!         groups: ["hpcusers"]
//!     servers:
//!       login:
//!         type: "ssh_server"
//!         host: "owens.osc.edu"
//! ```
//!
//! Validator and server entries carry a `type` tag plus arbitrary
//! implementation-owned fields; the core carries those fields opaquely and
//! each implementation re-deserializes them into its own options struct.

use crate::error::{ClusterKitError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// The single supported schema version key.
pub const CONFIG_VERSION: &str = "v1";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/clusterkit/clusters.yaml";

/// Environment variable for configuration file path.
pub const ENV_CONFIG_PATH: &str = "CLUSTERKIT_CONFIG";

/// A parsed configuration document.
///
/// Holds the raw top-level YAML so that unknown version keys can be ignored
/// without imposing a schema on them; the recognized version block is
/// extracted on demand by [`RegistryDocument::clusters`].
#[derive(Debug, Clone)]
pub struct RegistryDocument {
    doc: serde_yaml::Value,
}

impl RegistryDocument {
    /// Parses a configuration document from a YAML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let doc: serde_yaml::Value = serde_yaml::from_str(content)?;
        Ok(Self { doc })
    }

    /// Loads and parses a configuration document from the given path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClusterKitError::config_with_source(
                format!("Failed to read config file: {}", path.display()),
                e,
            )
        })?;

        Self::from_str(&content).map_err(|e| match e {
            ClusterKitError::Yaml(source) => ClusterKitError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                source,
            ),
            other => other,
        })
    }

    /// Resolves the configuration file path with the following priority:
    /// 1. Explicit path (if provided)
    /// 2. CLUSTERKIT_CONFIG environment variable
    /// 3. Default path (/etc/clusterkit/clusters.yaml)
    pub fn resolve_path(explicit_path: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit_path {
            return path.to_path_buf();
        }

        if let Ok(env_path) = env::var(ENV_CONFIG_PATH) {
            return PathBuf::from(env_path);
        }

        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Extracts the cluster entries under the supported schema version.
    ///
    /// A document without the version key fails with `ConfigVersion`; an
    /// empty version block (`v1:` with no entries) yields an empty map.
    pub fn clusters(&self) -> Result<HashMap<String, ClusterConfig>> {
        match self.doc.get(CONFIG_VERSION) {
            None => Err(ClusterKitError::ConfigVersion {
                expected: CONFIG_VERSION,
            }),
            Some(serde_yaml::Value::Null) => Ok(HashMap::new()),
            Some(block) => serde_yaml::from_value(block.clone()).map_err(|e| {
                ClusterKitError::config_with_source(
                    format!("Malformed '{}' cluster block", CONFIG_VERSION),
                    e,
                )
            }),
        }
    }
}

/// Configuration for one cluster entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Human-readable cluster title.
    pub title: String,

    /// Whether this cluster is an HPC cluster.
    #[serde(default = "default_true")]
    pub hpc_cluster: bool,

    /// Access validators, keyed by name.
    #[serde(default)]
    pub validators: HashMap<String, ComponentConfig>,

    /// Addressable servers, keyed by role name.
    #[serde(default)]
    pub servers: HashMap<String, ComponentConfig>,
}

fn default_true() -> bool {
    true
}

/// Configuration blob for a single validator or server.
///
/// Only the `type` tag is interpreted by the core; every other field is
/// owned by the resolved implementation and passed through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Type tag identifying the concrete implementation.
    #[serde(rename = "type")]
    pub kind: String,

    /// Implementation-owned fields, carried opaquely.
    #[serde(flatten)]
    pub options: HashMap<String, serde_yaml::Value>,
}

impl ComponentConfig {
    /// Creates a component config with no extra options (mostly for tests
    /// and programmatic registry construction).
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            options: HashMap::new(),
        }
    }

    /// Adds an option field.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Deserializes the implementation-owned fields into a typed options
    /// struct. Each concrete validator/server defines its own schema and
    /// calls this from its factory.
    pub fn options<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_yaml::Error> {
        let mapping: serde_yaml::Mapping = self
            .options
            .iter()
            .map(|(k, v)| (serde_yaml::Value::String(k.clone()), v.clone()))
            .collect();
        serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))
    }
}
