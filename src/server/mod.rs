//! Server capability and built-in server implementations.
//!
//! A server is a pluggable addressable endpoint registered under a role
//! name within a cluster (e.g. `login`, `batch`). The shared contract is
//! intentionally thin: a type tag, the common identity accessors most
//! consumers need, and an `Any` escape hatch for implementation-specific
//! accessors.

pub mod ssh;
pub mod web;

use std::any::Any;

// Re-exports for convenience
pub use ssh::SshServer;
pub use web::{Protocol, WebServer};

/// Trait for cluster servers.
pub trait Server: Send + Sync + std::fmt::Debug {
    /// Returns the type tag of this server.
    fn kind(&self) -> &'static str;

    /// Optional human-readable title.
    fn title(&self) -> Option<&str>;

    /// Hostname of the endpoint, when the implementation has one.
    fn host(&self) -> Option<&str>;

    /// Access to the concrete type for implementation-specific accessors.
    fn as_any(&self) -> &dyn Any;
}
