//! Allow/deny list validators for usernames and hostnames.
//!
//! Both validators share the same rule semantics: deny patterns are checked
//! first, an empty allow list allows everything, otherwise the subject must
//! match an allow pattern. Patterns are glob expressions.

use crate::config::ComponentConfig;
use crate::error::{ClusterKitError, Result};
use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use std::env;

/// Glob-based allow/deny rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AclRules {
    /// Allowed subjects (empty = allow all).
    pub allow: Vec<String>,

    /// Denied subjects.
    pub deny: Vec<String>,
}

impl AclRules {
    /// Checks if a subject is allowed.
    /// Evaluation order: denied -> (allowed empty = allow all) -> allowed match -> deny
    pub fn is_allowed(&self, subject: &str) -> bool {
        for pattern in &self.deny {
            if glob_match::glob_match(pattern, subject) {
                return false;
            }
        }

        if self.allow.is_empty() {
            return true;
        }

        for pattern in &self.allow {
            if glob_match::glob_match(pattern, subject) {
                return true;
            }
        }

        false
    }
}

/// Validator matching the current username against allow/deny globs.
#[derive(Debug, Clone)]
pub struct UserValidator {
    rules: AclRules,
}

impl UserValidator {
    /// Type tag under which this validator is registered.
    pub const KIND: &'static str = "user_validator";

    /// Creates a user validator from explicit rules.
    pub fn new(rules: AclRules) -> Self {
        Self { rules }
    }

    /// Factory for the type resolver.
    pub fn from_config(cfg: &ComponentConfig) -> Result<Box<dyn Validator>> {
        let rules: AclRules = cfg.options().map_err(|e| {
            ClusterKitError::config_with_source(format!("Invalid {} options", Self::KIND), e)
        })?;
        Ok(Box::new(Self::new(rules)))
    }

    /// Pure rule check against an explicit username.
    pub fn check(&self, username: &str) -> bool {
        self.rules.is_allowed(username)
    }

    fn current_user() -> Result<String> {
        env::var("USER").or_else(|_| env::var("LOGNAME")).map_err(|_| {
            ClusterKitError::validator_runtime(
                Self::KIND,
                "could not determine current user (USER/LOGNAME unset)",
            )
        })
    }
}

impl Validator for UserValidator {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn validate(&self) -> Result<bool> {
        Ok(self.check(&Self::current_user()?))
    }
}

/// Validator matching the local hostname against allow/deny globs.
///
/// Useful for clusters only reachable from specific login hosts.
#[derive(Debug, Clone)]
pub struct HostValidator {
    rules: AclRules,
}

impl HostValidator {
    /// Type tag under which this validator is registered.
    pub const KIND: &'static str = "host_validator";

    /// Creates a host validator from explicit rules.
    pub fn new(rules: AclRules) -> Self {
        Self { rules }
    }

    /// Factory for the type resolver.
    pub fn from_config(cfg: &ComponentConfig) -> Result<Box<dyn Validator>> {
        let rules: AclRules = cfg.options().map_err(|e| {
            ClusterKitError::config_with_source(format!("Invalid {} options", Self::KIND), e)
        })?;
        Ok(Box::new(Self::new(rules)))
    }

    /// Pure rule check against an explicit hostname.
    pub fn check(&self, host: &str) -> bool {
        self.rules.is_allowed(host)
    }
}

impl Validator for HostValidator {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn validate(&self) -> Result<bool> {
        let host = hostname::get()
            .map_err(|e| {
                ClusterKitError::validator_runtime_with_source(
                    Self::KIND,
                    "could not determine local hostname",
                    e,
                )
            })?
            .to_string_lossy()
            .to_string();

        Ok(self.check(&host))
    }
}
