//! Group membership validator.
//!
//! Reports valid when the current user belongs to at least one of the
//! configured unix groups. The membership test itself is a pure function
//! over a group list; the group list is read by invoking `id -Gn`.

use crate::config::ComponentConfig;
use crate::error::{ClusterKitError, Result};
use crate::validator::Validator;
use serde::Deserialize;
use std::process::Command;

#[derive(Debug, Deserialize)]
struct GroupOptions {
    /// Groups granting access; membership in any one suffices.
    groups: Vec<String>,
}

/// Validator checking unix group membership.
#[derive(Debug, Clone)]
pub struct GroupValidator {
    groups: Vec<String>,
}

impl GroupValidator {
    /// Type tag under which this validator is registered.
    pub const KIND: &'static str = "group_validator";

    /// Creates a group validator from an explicit group list.
    pub fn new(groups: Vec<String>) -> Self {
        Self { groups }
    }

    /// Factory for the type resolver.
    pub fn from_config(cfg: &ComponentConfig) -> Result<Box<dyn Validator>> {
        let opts: GroupOptions = cfg.options().map_err(|e| {
            ClusterKitError::config_with_source(format!("Invalid {} options", Self::KIND), e)
        })?;

        if opts.groups.is_empty() {
            return Err(ClusterKitError::config(format!(
                "{} requires at least one group",
                Self::KIND
            )));
        }

        Ok(Box::new(Self::new(opts.groups)))
    }

    /// Pure membership test against an explicit group list.
    pub fn member_of(&self, current_groups: &[String]) -> bool {
        self.groups.iter().any(|g| current_groups.contains(g))
    }

    /// Reads the current user's group names via `id -Gn`.
    fn current_groups() -> Result<Vec<String>> {
        let output = Command::new("id").arg("-Gn").output().map_err(|e| {
            ClusterKitError::validator_runtime_with_source(
                Self::KIND,
                "failed to invoke `id -Gn`",
                e,
            )
        })?;

        if !output.status.success() {
            return Err(ClusterKitError::validator_runtime(
                Self::KIND,
                format!("`id -Gn` exited with {}", output.status),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.split_whitespace().map(str::to_string).collect())
    }
}

impl Validator for GroupValidator {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn validate(&self) -> Result<bool> {
        Ok(self.member_of(&Self::current_groups()?))
    }
}
