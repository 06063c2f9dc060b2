//! SSH login endpoint.

use crate::config::ComponentConfig;
use crate::error::{ClusterKitError, Result};
use crate::server::Server;
use serde::Deserialize;
use std::any::Any;

#[derive(Debug, Deserialize)]
struct SshOptions {
    host: String,

    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    title: Option<String>,
}

fn default_port() -> u16 {
    22
}

/// An SSH-reachable endpoint, typically a cluster login node.
#[derive(Debug, Clone)]
pub struct SshServer {
    host: String,
    port: u16,
    title: Option<String>,
}

impl SshServer {
    /// Type tag under which this server is registered.
    pub const KIND: &'static str = "ssh_server";

    /// Creates an SSH server endpoint.
    pub fn new(host: impl Into<String>, port: u16, title: Option<String>) -> Self {
        Self {
            host: host.into(),
            port,
            title,
        }
    }

    /// Factory for the type resolver.
    pub fn from_config(cfg: &ComponentConfig) -> Result<Box<dyn Server>> {
        let opts: SshOptions = cfg.options().map_err(|e| {
            ClusterKitError::config_with_source(format!("Invalid {} options", Self::KIND), e)
        })?;
        Ok(Box::new(Self::new(opts.host, opts.port, opts.title)))
    }

    /// SSH port (22 unless configured otherwise).
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host` or `host:port` when the port is non-default, as consumed by
    /// shell-app URL builders.
    pub fn connect_spec(&self) -> String {
        if self.port == 22 {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Server for SshServer {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn host(&self) -> Option<&str> {
        Some(&self.host)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
