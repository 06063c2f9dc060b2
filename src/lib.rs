//! clusterkit - Cluster registry for multi-tenant HPC web portals
//!
//! This crate turns a versioned YAML configuration into an object model of
//! accessible compute clusters: each cluster carries a set of pluggable
//! access validators and a set of servers keyed by role (`login`, `batch`,
//! ...). The registry filters clusters by validator results, so a caller
//! only sees the clusters the current user/environment may use.
//!
//! # Overview
//!
//! ```no_run
//! use clusterkit::ClusterRegistry;
//!
//! let registry = ClusterRegistry::default();
//! let clusters = registry.all("/etc/clusterkit/clusters.yaml", false)?;
//!
//! if let Some(owens) = clusters.get("owens") {
//!     if let Some(login) = owens.server_by_role("login") {
//!         println!("{} login: {:?}", owens.title(), login.host());
//!     }
//! }
//! # Ok::<(), clusterkit::ClusterKitError>(())
//! ```
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`cluster`] - The cluster entity
//! - [`config`] - Configuration document parsing
//! - [`error`] - Error types and error handling
//! - [`registry`] - Configuration-driven cluster loading and filtering
//! - [`resolver`] - Type tag resolution for pluggable implementations
//! - [`server`] - Server capability and built-in endpoints
//! - [`validator`] - Validator capability and built-in checks

pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod server;
pub mod validator;

#[cfg(test)]
mod registry_tests;

// Re-exports for convenience
pub use cluster::{Cluster, ClusterSummary, ServerSummary};
pub use config::{ClusterConfig, ComponentConfig, RegistryDocument, CONFIG_VERSION};
pub use error::{ClusterKitError, ErrorCode, Result};
pub use registry::ClusterRegistry;
pub use resolver::TypeResolver;
pub use server::Server;
pub use validator::Validator;
