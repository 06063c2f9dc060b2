//! Web endpoint (dashboard, Ganglia-style status pages, file browsers).

use crate::config::ComponentConfig;
use crate::error::{ClusterKitError, Result};
use crate::server::Server;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// URI scheme for a web endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    /// Returns the URI scheme string.
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.scheme())
    }
}

#[derive(Debug, Deserialize)]
struct WebOptions {
    host: String,

    #[serde(default)]
    protocol: Protocol,

    #[serde(default)]
    port: Option<u16>,

    #[serde(default)]
    title: Option<String>,
}

/// An HTTP(S)-reachable endpoint associated with a cluster.
#[derive(Debug, Clone)]
pub struct WebServer {
    host: String,
    protocol: Protocol,
    port: Option<u16>,
    title: Option<String>,
}

impl WebServer {
    /// Type tag under which this server is registered.
    pub const KIND: &'static str = "web_server";

    /// Creates a web server endpoint.
    pub fn new(
        host: impl Into<String>,
        protocol: Protocol,
        port: Option<u16>,
        title: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            protocol,
            port,
            title,
        }
    }

    /// Factory for the type resolver.
    pub fn from_config(cfg: &ComponentConfig) -> Result<Box<dyn Server>> {
        let opts: WebOptions = cfg.options().map_err(|e| {
            ClusterKitError::config_with_source(format!("Invalid {} options", Self::KIND), e)
        })?;
        Ok(Box::new(Self::new(
            opts.host,
            opts.protocol,
            opts.port,
            opts.title,
        )))
    }

    /// URI scheme of the endpoint.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Base URI of the endpoint.
    pub fn uri(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.protocol.scheme(), self.host, port),
            None => format!("{}://{}", self.protocol.scheme(), self.host),
        }
    }
}

impl Server for WebServer {
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
