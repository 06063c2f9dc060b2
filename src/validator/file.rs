//! Filesystem presence validator.

use crate::config::ComponentConfig;
use crate::error::{ClusterKitError, Result};
use crate::validator::Validator;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct FileOptions {
    path: PathBuf,
}

/// Validator reporting valid when a path exists.
///
/// Typical use: a cluster is only usable where its scheduler config or
/// shared filesystem is mounted.
#[derive(Debug, Clone)]
pub struct FileValidator {
    path: PathBuf,
}

impl FileValidator {
    /// Type tag under which this validator is registered.
    pub const KIND: &'static str = "file_validator";

    /// Creates a file validator for an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Factory for the type resolver.
    pub fn from_config(cfg: &ComponentConfig) -> Result<Box<dyn Validator>> {
        let opts: FileOptions = cfg.options().map_err(|e| {
            ClusterKitError::config_with_source(format!("Invalid {} options", Self::KIND), e)
        })?;
        Ok(Box::new(Self::new(opts.path)))
    }

    /// The path being checked.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Validator for FileValidator {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn validate(&self) -> Result<bool> {
        Ok(self.path.exists())
    }
}
