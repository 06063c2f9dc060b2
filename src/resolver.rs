//! Type resolver: maps configuration type tags to concrete implementations.
//!
//! Resolution is an explicit, inspectable registry populated at startup.
//! The set of implementations is fixed once registration is done; the
//! configuration then picks among them by tag. Both the validator and
//! server sides are open sets: embedding applications can register their
//! own implementations before any registry load, without touching cluster
//! or registry logic.

use crate::config::ComponentConfig;
use crate::error::{ClusterKitError, Result};
use crate::server::{Server, SshServer, WebServer};
use crate::validator::{FileValidator, GroupValidator, HostValidator, UserValidator, Validator};
use std::collections::HashMap;

/// Factory function building a validator from its configuration blob.
pub type ValidatorFactory = fn(&ComponentConfig) -> Result<Box<dyn Validator>>;

/// Factory function building a server from its configuration blob.
pub type ServerFactory = fn(&ComponentConfig) -> Result<Box<dyn Server>>;

/// Registry of constructible validator and server implementations.
pub struct TypeResolver {
    validators: HashMap<String, ValidatorFactory>,
    servers: HashMap<String, ServerFactory>,
}

impl TypeResolver {
    /// Creates an empty resolver with no registered implementations.
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
            servers: HashMap::new(),
        }
    }

    /// Creates a resolver pre-populated with every built-in implementation.
    pub fn with_builtins() -> Self {
        let mut resolver = Self::new();

        resolver.register_validator(GroupValidator::KIND, GroupValidator::from_config);
        resolver.register_validator(UserValidator::KIND, UserValidator::from_config);
        resolver.register_validator(HostValidator::KIND, HostValidator::from_config);
        resolver.register_validator(FileValidator::KIND, FileValidator::from_config);

        resolver.register_server(SshServer::KIND, SshServer::from_config);
        resolver.register_server(WebServer::KIND, WebServer::from_config);

        resolver
    }

    /// Registers a validator factory under a type tag, replacing any
    /// previous registration for that tag.
    pub fn register_validator(&mut self, tag: impl Into<String>, factory: ValidatorFactory) {
        self.validators.insert(tag.into(), factory);
    }

    /// Registers a server factory under a type tag, replacing any previous
    /// registration for that tag.
    pub fn register_server(&mut self, tag: impl Into<String>, factory: ServerFactory) {
        self.servers.insert(tag.into(), factory);
    }

    /// Builds a validator for the given config key. Fails fast with
    /// `UnknownType` when the tag has no registered implementation.
    pub fn build_validator(&self, key: &str, cfg: &ComponentConfig) -> Result<Box<dyn Validator>> {
        let factory = self
            .validators
            .get(&cfg.kind)
            .ok_or_else(|| ClusterKitError::unknown_type(&cfg.kind, key))?;
        factory(cfg)
    }

    /// Builds a server for the given config key. Fails fast with
    /// `UnknownType` when the tag has no registered implementation.
    pub fn build_server(&self, key: &str, cfg: &ComponentConfig) -> Result<Box<dyn Server>> {
        let factory = self
            .servers
            .get(&cfg.kind)
            .ok_or_else(|| ClusterKitError::unknown_type(&cfg.kind, key))?;
        factory(cfg)
    }

    /// Registered validator tags, sorted.
    pub fn validator_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Registered server tags, sorted.
    pub fn server_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.servers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::with_builtins()
    }
}
