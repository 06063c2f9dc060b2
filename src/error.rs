//! Error types and error handling for clusterkit.
//!
//! This module defines all error types used throughout the crate,
//! including error codes and CLI exit codes. The taxonomy keeps
//! configuration mistakes (unknown types, malformed entries, missing
//! schema version) distinct from runtime failures inside a validator,
//! since the two have different operational meanings.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for stable identification in logs and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// E001: Configuration file is invalid or cannot be loaded
    #[serde(rename = "E001")]
    ConfigInvalid,

    /// E002: Configuration is missing the supported schema version
    #[serde(rename = "E002")]
    ConfigVersionMissing,

    /// E003: A cluster entry in the configuration is malformed
    #[serde(rename = "E003")]
    ConfigEntryInvalid,

    /// E004: A configured type tag has no registered implementation
    #[serde(rename = "E004")]
    UnknownType,

    /// E005: A validator implementation failed while checking validity
    #[serde(rename = "E005")]
    ValidatorFailed,

    /// E006: Requested cluster does not exist
    #[serde(rename = "E006")]
    ClusterNotFound,
}

impl ErrorCode {
    /// Returns the error code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalid => "E001",
            ErrorCode::ConfigVersionMissing => "E002",
            ErrorCode::ConfigEntryInvalid => "E003",
            ErrorCode::UnknownType => "E004",
            ErrorCode::ValidatorFailed => "E005",
            ErrorCode::ClusterNotFound => "E006",
        }
    }

    /// Returns the default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalid => "Configuration file is invalid",
            ErrorCode::ConfigVersionMissing => "Configuration schema version is missing",
            ErrorCode::ConfigEntryInvalid => "Cluster configuration entry is malformed",
            ErrorCode::UnknownType => "No implementation registered for type tag",
            ErrorCode::ValidatorFailed => "Validator failed while checking cluster validity",
            ErrorCode::ClusterNotFound => "Cluster not found",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CLI exit codes.
pub mod exit_code {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Configuration error
    pub const CONFIG_ERROR: i32 = 2;
    /// Validator runtime error
    pub const VALIDATOR_ERROR: i32 = 3;
    /// Command line argument error
    pub const CLI_ERROR: i32 = 64;
}

/// The main error type for clusterkit.
#[derive(Debug, Error)]
pub enum ClusterKitError {
    /// Configuration file is invalid or cannot be loaded.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration document does not contain the supported schema version.
    #[error("Configuration is missing schema version '{expected}'")]
    ConfigVersion { expected: &'static str },

    /// A cluster entry in the configuration is malformed.
    #[error("Invalid configuration for cluster '{cluster}': {message}")]
    ConfigEntry {
        cluster: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configured `type` tag has no registered implementation.
    #[error("Unknown type '{tag}' for '{key}'")]
    UnknownType { tag: String, key: String },

    /// A validator raised while computing `validate()`. Distinct from a
    /// legitimate `false`: this means something broke, not "access denied".
    #[error("Validator '{validator}' failed: {message}")]
    ValidatorRuntime {
        validator: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Requested cluster does not exist in the registry result.
    #[error("Cluster not found: {cluster}")]
    ClusterNotFound { cluster: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClusterKitError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ClusterKitError::Config { .. } => ErrorCode::ConfigInvalid,
            ClusterKitError::ConfigVersion { .. } => ErrorCode::ConfigVersionMissing,
            ClusterKitError::ConfigEntry { .. } => ErrorCode::ConfigEntryInvalid,
            ClusterKitError::UnknownType { .. } => ErrorCode::UnknownType,
            ClusterKitError::ValidatorRuntime { .. } => ErrorCode::ValidatorFailed,
            ClusterKitError::ClusterNotFound { .. } => ErrorCode::ClusterNotFound,
            ClusterKitError::Io(_) => ErrorCode::ConfigInvalid,
            ClusterKitError::Yaml(_) => ErrorCode::ConfigInvalid,
            ClusterKitError::Json(_) => ErrorCode::ConfigInvalid,
        }
    }

    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClusterKitError::Config { .. }
            | ClusterKitError::ConfigVersion { .. }
            | ClusterKitError::ConfigEntry { .. }
            | ClusterKitError::UnknownType { .. }
            | ClusterKitError::Yaml(_) => exit_code::CONFIG_ERROR,
            ClusterKitError::ValidatorRuntime { .. } => exit_code::VALIDATOR_ERROR,
            _ => exit_code::GENERAL_ERROR,
        }
    }

    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        ClusterKitError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ClusterKitError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a malformed-entry error naming the cluster.
    pub fn config_entry(cluster: impl Into<String>, message: impl Into<String>) -> Self {
        ClusterKitError::ConfigEntry {
            cluster: cluster.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a malformed-entry error with a source.
    pub fn config_entry_with_source(
        cluster: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ClusterKitError::ConfigEntry {
            cluster: cluster.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an unknown-type error for the given tag and config key.
    pub fn unknown_type(tag: impl Into<String>, key: impl Into<String>) -> Self {
        ClusterKitError::UnknownType {
            tag: tag.into(),
            key: key.into(),
        }
    }

    /// Creates a validator runtime error.
    pub fn validator_runtime(validator: impl Into<String>, message: impl Into<String>) -> Self {
        ClusterKitError::ValidatorRuntime {
            validator: validator.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a validator runtime error with a source.
    pub fn validator_runtime_with_source(
        validator: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ClusterKitError::ValidatorRuntime {
            validator: validator.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias for clusterkit operations.
pub type Result<T> = std::result::Result<T, ClusterKitError>;
