//! The Cluster entity.
//!
//! A cluster aggregates the validators gating access to it and the servers
//! it exposes, both keyed by name. Construction fans each configuration
//! entry out through the type resolver and fails fast: a cluster never
//! exists in a partially-built state. Once constructed it is immutable.

use crate::config::ClusterConfig;
use crate::error::{ClusterKitError, Result};
use crate::resolver::TypeResolver;
use crate::server::Server;
use crate::validator::Validator;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A named HPC resource pool with access validators and role-keyed servers.
pub struct Cluster {
    name: String,
    title: String,
    hpc_cluster: bool,
    validators: HashMap<String, Box<dyn Validator>>,
    servers: HashMap<String, Box<dyn Server>>,
}

impl Cluster {
    /// Constructs a cluster from its configuration entry.
    ///
    /// Unknown type tags propagate as `UnknownType`; any other component
    /// construction failure becomes `ConfigEntry` naming this cluster and
    /// the offending component key.
    pub fn from_config(
        name: impl Into<String>,
        config: &ClusterConfig,
        resolver: &TypeResolver,
    ) -> Result<Self> {
        let name = name.into();

        let mut validators: HashMap<String, Box<dyn Validator>> =
            HashMap::with_capacity(config.validators.len());
        for (key, component) in &config.validators {
            let validator = resolver
                .build_validator(key, component)
                .map_err(|e| Self::entry_error(&name, "validator", key, e))?;
            validators.insert(key.clone(), validator);
        }

        let mut servers: HashMap<String, Box<dyn Server>> =
            HashMap::with_capacity(config.servers.len());
        for (key, component) in &config.servers {
            let server = resolver
                .build_server(key, component)
                .map_err(|e| Self::entry_error(&name, "server", key, e))?;
            servers.insert(key.clone(), server);
        }

        tracing::debug!(
            cluster = %name,
            validators = validators.len(),
            servers = servers.len(),
            "Constructed cluster"
        );

        Ok(Self {
            name,
            title: config.title.clone(),
            hpc_cluster: config.hpc_cluster,
            validators,
            servers,
        })
    }

    fn entry_error(
        cluster: &str,
        component: &str,
        key: &str,
        err: ClusterKitError,
    ) -> ClusterKitError {
        match err {
            // UnknownType already identifies the tag and key.
            unknown @ ClusterKitError::UnknownType { .. } => unknown,
            other => ClusterKitError::config_entry_with_source(
                cluster,
                format!("{} '{}' could not be built", component, key),
                other,
            ),
        }
    }

    /// The registry key this cluster was configured under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable cluster title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether this cluster is an HPC cluster.
    pub fn is_hpc_cluster(&self) -> bool {
        self.hpc_cluster
    }

    /// Checks whether every validator accepts the current environment.
    ///
    /// Vacuously true with zero validators; short-circuits on the first
    /// `false`. A validator that raises surfaces as `ValidatorRuntime`
    /// identifying the validator key, never as `false`.
    pub fn valid(&self) -> Result<bool> {
        for (key, validator) in &self.validators {
            match validator.validate() {
                Ok(true) => continue,
                Ok(false) => {
                    tracing::debug!(
                        cluster = %self.name,
                        validator = %key,
                        kind = %validator.kind(),
                        "Validator rejected cluster"
                    );
                    return Ok(false);
                }
                Err(e) => {
                    let message = e.to_string();
                    return Err(ClusterKitError::validator_runtime_with_source(
                        key.clone(),
                        message,
                        e,
                    ));
                }
            }
        }

        Ok(true)
    }

    /// Exact-key server lookup; `None` when the role is not configured.
    pub fn server(&self, role: &str) -> Option<&dyn Server> {
        self.servers.get(role).map(|s| s.as_ref())
    }

    /// Whether a server is configured under the given role.
    pub fn has_server(&self, role: &str) -> bool {
        self.servers.contains_key(role)
    }

    /// Looks up a server by role name.
    ///
    /// The role space is driven entirely by the configured `servers` keys:
    /// a new role becomes queryable by adding a configuration key, with no
    /// code change here.
    pub fn server_by_role(&self, role: &str) -> Option<&dyn Server> {
        self.server(role)
    }

    /// Whether the given role is configured.
    pub fn has_server_by_role(&self, role: &str) -> bool {
        self.has_server(role)
    }

    /// Exact-key validator lookup.
    pub fn validator(&self, name: &str) -> Option<&dyn Validator> {
        self.validators.get(name).map(|v| v.as_ref())
    }

    /// Configured server roles, sorted for stable output.
    pub fn server_roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self.servers.keys().map(String::as_str).collect();
        roles.sort_unstable();
        roles
    }

    /// Configured validator names, sorted for stable output.
    pub fn validator_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Builds a serializable summary of this cluster, evaluating validity.
    pub fn summarize(&self) -> Result<ClusterSummary> {
        let mut servers: Vec<ServerSummary> = self
            .servers
            .iter()
            .map(|(role, server)| ServerSummary {
                role: role.clone(),
                kind: server.kind().to_string(),
                host: server.host().map(str::to_string),
                title: server.title().map(str::to_string),
            })
            .collect();
        servers.sort_by(|a, b| a.role.cmp(&b.role));

        Ok(ClusterSummary {
            name: self.name.clone(),
            title: self.title.clone(),
            hpc_cluster: self.hpc_cluster,
            valid: self.valid()?,
            servers,
        })
    }
}

impl fmt::Debug for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cluster")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("hpc_cluster", &self.hpc_cluster)
            .field("validators", &self.validator_names())
            .field("servers", &self.server_roles())
            .finish()
    }
}

/// Serializable cluster report for status pages and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    pub name: String,
    pub title: String,
    pub hpc_cluster: bool,
    pub valid: bool,
    pub servers: Vec<ServerSummary>,
}

/// Serializable server report.
#[derive(Debug, Clone, Serialize)]
pub struct ServerSummary {
    pub role: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentConfig;

    fn resolver() -> TypeResolver {
        TypeResolver::with_builtins()
    }

    fn owens_config() -> ClusterConfig {
        ClusterConfig {
            title: "Owens".to_string(),
            hpc_cluster: true,
            validators: HashMap::new(),
            servers: HashMap::from([(
                "login".to_string(),
                ComponentConfig::new("ssh_server").with_option("host", "owens.osc.edu"),
            )]),
        }
    }

    #[test]
    fn test_construction_is_lossless() {
        let cluster = Cluster::from_config("osc", &owens_config(), &resolver()).unwrap();

        assert_eq!(cluster.name(), "osc");
        assert_eq!(cluster.title(), "Owens");
        assert!(cluster.is_hpc_cluster());
        assert_eq!(cluster.server_roles(), vec!["login"]);
        assert_eq!(
            cluster.server("login").unwrap().host(),
            Some("owens.osc.edu")
        );
    }

    #[test]
    fn test_zero_validators_is_vacuously_valid() {
        let cluster = Cluster::from_config("osc", &owens_config(), &resolver()).unwrap();
        assert!(cluster.valid().unwrap());
    }

    #[test]
    fn test_one_false_validator_invalidates() {
        let mut config = owens_config();
        // file_validator against a path that cannot exist reports false
        config.validators.insert(
            "scheduler".to_string(),
            ComponentConfig::new("file_validator").with_option("path", "/nonexistent/slurm.conf"),
        );

        let cluster = Cluster::from_config("osc", &config, &resolver()).unwrap();
        assert!(!cluster.valid().unwrap());
    }

    #[test]
    fn test_server_lookup_absent_role() {
        let cluster = Cluster::from_config("osc", &owens_config(), &resolver()).unwrap();

        assert!(cluster.server("batch").is_none());
        assert!(!cluster.has_server("batch"));
        assert!(cluster.has_server("login"));
    }

    #[test]
    fn test_new_role_needs_only_configuration() {
        let mut config = owens_config();
        config.servers.insert(
            "ganglia".to_string(),
            ComponentConfig::new("web_server").with_option("host", "ganglia.osc.edu"),
        );

        let cluster = Cluster::from_config("osc", &config, &resolver()).unwrap();

        assert!(cluster.has_server_by_role("ganglia"));
        assert!(cluster.has_server_by_role("login"));
        assert!(!cluster.has_server_by_role("files"));
        assert_eq!(
            cluster.server_by_role("ganglia").unwrap().kind(),
            "web_server"
        );
    }

    #[test]
    fn test_unknown_server_type_aborts_construction() {
        let mut config = owens_config();
        config.servers.insert(
            "batch".to_string(),
            ComponentConfig::new("unregistered_type"),
        );

        let err = Cluster::from_config("osc", &config, &resolver()).unwrap_err();
        assert!(matches!(err, ClusterKitError::UnknownType { .. }));
    }

    #[test]
    fn test_malformed_component_names_cluster_and_key() {
        let mut config = owens_config();
        // ssh_server without a host fails option deserialization
        config
            .servers
            .insert("batch".to_string(), ComponentConfig::new("ssh_server"));

        let err = Cluster::from_config("osc", &config, &resolver()).unwrap_err();
        match err {
            ClusterKitError::ConfigEntry { cluster, message, .. } => {
                assert_eq!(cluster, "osc");
                assert!(message.contains("batch"));
            }
            other => panic!("expected ConfigEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_validator_runtime_error_is_distinct_from_false() {
        use crate::error::Result;
        use crate::validator::Validator;

        struct Broken;

        impl Validator for Broken {
            fn kind(&self) -> &'static str {
                "broken"
            }

            fn validate(&self) -> Result<bool> {
                Err(ClusterKitError::validator_runtime("broken", "probe failed"))
            }
        }

        fn broken_factory(_cfg: &ComponentConfig) -> Result<Box<dyn Validator>> {
            Ok(Box::new(Broken))
        }

        let mut resolver = TypeResolver::with_builtins();
        resolver.register_validator("broken", broken_factory);

        let mut config = owens_config();
        config
            .validators
            .insert("gate".to_string(), ComponentConfig::new("broken"));

        let cluster = Cluster::from_config("osc", &config, &resolver).unwrap();
        let err = cluster.valid().unwrap_err();
        match err {
            ClusterKitError::ValidatorRuntime { validator, .. } => {
                assert_eq!(validator, "gate");
            }
            other => panic!("expected ValidatorRuntime, got {:?}", other),
        }
    }

    #[test]
    fn test_summarize() {
        let cluster = Cluster::from_config("osc", &owens_config(), &resolver()).unwrap();
        let summary = cluster.summarize().unwrap();

        assert_eq!(summary.name, "osc");
        assert_eq!(summary.title, "Owens");
        assert!(summary.hpc_cluster);
        assert!(summary.valid);
        assert_eq!(summary.servers.len(), 1);
        assert_eq!(summary.servers[0].role, "login");
        assert_eq!(summary.servers[0].host, Some("owens.osc.edu".to_string()));

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"name\":\"osc\""));
        assert!(json.contains("owens.osc.edu"));
    }
}
