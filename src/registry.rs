//! The cluster registry: turns a configuration source into the set of
//! clusters available to the caller.
//!
//! Every load re-reads, re-parses, and re-validates; nothing is cached
//! across calls, so validator-dependent environment state (current user,
//! mounted filesystems) is re-evaluated each time. Any entry that fails to
//! construct aborts the whole load: a partially-loaded registry is worse
//! than a hard failure.

use crate::cluster::Cluster;
use crate::config::RegistryDocument;
use crate::error::Result;
use crate::resolver::TypeResolver;
use std::collections::HashMap;
use std::path::Path;

/// Loads clusters from a versioned configuration document and filters them
/// by validity.
pub struct ClusterRegistry {
    resolver: TypeResolver,
}

impl ClusterRegistry {
    /// Creates a registry backed by the given type resolver.
    pub fn new(resolver: TypeResolver) -> Self {
        Self { resolver }
    }

    /// Registers additional implementations before loading.
    pub fn resolver_mut(&mut self) -> &mut TypeResolver {
        &mut self.resolver
    }

    /// Loads all accessible clusters from a configuration file.
    ///
    /// With `force` set, validator gating is bypassed and every configured
    /// cluster is returned regardless of validity (operator/status-page
    /// inspection mode).
    pub fn all(&self, path: impl AsRef<Path>, force: bool) -> Result<HashMap<String, Cluster>> {
        let doc = RegistryDocument::from_path(path)?;
        self.build(&doc, force)
    }

    /// Loads all accessible clusters from an in-memory YAML document.
    pub fn all_from_str(&self, yaml: &str, force: bool) -> Result<HashMap<String, Cluster>> {
        let doc = RegistryDocument::from_str(yaml)?;
        self.build(&doc, force)
    }

    fn build(&self, doc: &RegistryDocument, force: bool) -> Result<HashMap<String, Cluster>> {
        let configs = doc.clusters()?;
        let mut clusters = HashMap::with_capacity(configs.len());

        for (name, config) in &configs {
            let cluster = Cluster::from_config(name.clone(), config, &self.resolver)?;

            if force || cluster.valid()? {
                clusters.insert(name.clone(), cluster);
            } else {
                tracing::debug!(cluster = %name, "Skipping invalid cluster");
            }
        }

        tracing::debug!(
            configured = configs.len(),
            accessible = clusters.len(),
            force,
            "Loaded cluster registry"
        );

        Ok(clusters)
    }
}

impl Default for ClusterRegistry {
    fn default() -> Self {
        Self::new(TypeResolver::with_builtins())
    }
}
