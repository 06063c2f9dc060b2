//! Scenario tests for the cluster registry.

use crate::cluster::Cluster;
use crate::config::ComponentConfig;
use crate::error::{ClusterKitError, Result};
use crate::registry::ClusterRegistry;
use crate::resolver::TypeResolver;
use crate::validator::Validator;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

struct Always(bool);

impl Validator for Always {
    fn kind(&self) -> &'static str {
        "always"
    }

    fn validate(&self) -> Result<bool> {
        Ok(self.0)
    }
}

fn always_true(_cfg: &ComponentConfig) -> Result<Box<dyn Validator>> {
    Ok(Box::new(Always(true)))
}

fn always_false(_cfg: &ComponentConfig) -> Result<Box<dyn Validator>> {
    Ok(Box::new(Always(false)))
}

fn registry_with_test_validators() -> ClusterRegistry {
    let mut resolver = TypeResolver::with_builtins();
    resolver.register_validator("always_true", always_true);
    resolver.register_validator("always_false", always_false);
    ClusterRegistry::new(resolver)
}

#[test]
fn accessible_cluster_with_login_server() {
    // Scenario A: no validators, one ssh login server.
    let yaml = r#"
v1:
  osc:
    title: "Owens"
    hpc_cluster: true
    validators: {}
    servers:
      login:
        type: "ssh_server"
        host: "owens.osc.edu"
"#;

    let registry = ClusterRegistry::default();
    let clusters = registry.all_from_str(yaml, false).unwrap();

    assert_eq!(clusters.len(), 1);
    let osc = clusters.get("osc").unwrap();
    assert!(osc.valid().unwrap());
    assert_eq!(osc.title(), "Owens");
    assert!(osc.is_hpc_cluster());
    assert_eq!(osc.server("login").unwrap().host(), Some("owens.osc.edu"));
}

#[test]
fn rejecting_validator_hides_cluster_unless_forced() {
    // Scenario B: a validator reporting false gates the cluster out of the
    // default result but not out of the forced one.
    let yaml = r#"
v1:
  osc:
    title: "Owens"
    validators:
      group:
        type: "always_false"
    servers:
      login:
        type: "ssh_server"
        host: "owens.osc.edu"
"#;

    let registry = registry_with_test_validators();

    let clusters = registry.all_from_str(yaml, false).unwrap();
    assert!(clusters.is_empty());

    let clusters = registry.all_from_str(yaml, true).unwrap();
    let osc = clusters.get("osc").unwrap();
    assert!(!osc.valid().unwrap());
    assert_eq!(osc.server("login").unwrap().host(), Some("owens.osc.edu"));
}

#[test]
fn unknown_server_type_fails_the_load() {
    // Scenario C: no partially-built entry survives an unknown type tag.
    let yaml = r#"
v1:
  osc:
    title: "Owens"
    servers:
      login:
        type: "unregistered_type"
        host: "owens.osc.edu"
"#;

    let registry = ClusterRegistry::default();
    let err = registry.all_from_str(yaml, false).unwrap_err();

    match err {
        ClusterKitError::UnknownType { tag, key } => {
            assert_eq!(tag, "unregistered_type");
            assert_eq!(key, "login");
        }
        other => panic!("expected UnknownType, got {:?}", other),
    }
}

#[test]
fn missing_version_is_an_error() {
    // Scenario D: the chosen policy for a document without the supported
    // version block is a hard ConfigVersion error.
    let yaml = r#"
v0:
  osc:
    title: "Owens"
"#;

    let registry = ClusterRegistry::default();
    let err = registry.all_from_str(yaml, false).unwrap_err();
    assert!(matches!(
        err,
        ClusterKitError::ConfigVersion { expected: "v1" }
    ));
}

#[test]
fn forced_result_is_a_superset_by_key() {
    let yaml = r#"
v1:
  open:
    title: "Open Cluster"
  gated:
    title: "Gated Cluster"
    validators:
      gate:
        type: "always_false"
  granted:
    title: "Granted Cluster"
    validators:
      gate:
        type: "always_true"
"#;

    let registry = registry_with_test_validators();

    let filtered = registry.all_from_str(yaml, false).unwrap();
    let forced = registry.all_from_str(yaml, true).unwrap();

    let mut filtered_keys: Vec<&String> = filtered.keys().collect();
    filtered_keys.sort();
    assert_eq!(filtered_keys, vec!["granted", "open"]);

    assert_eq!(forced.len(), 3);
    for key in filtered.keys() {
        assert!(forced.contains_key(key));
    }
}

#[test]
fn repeated_loads_are_equivalent() {
    let yaml = r#"
v1:
  osc:
    title: "Owens"
    hpc_cluster: false
    servers:
      login:
        type: "ssh_server"
        host: "owens.osc.edu"
"#;

    let registry = ClusterRegistry::default();

    let first = registry.all_from_str(yaml, false).unwrap();
    let second = registry.all_from_str(yaml, false).unwrap();

    assert_eq!(first.len(), second.len());
    for (name, cluster) in &first {
        let other = second.get(name).unwrap();
        assert_eq!(cluster.title(), other.title());
        assert_eq!(cluster.is_hpc_cluster(), other.is_hpc_cluster());
        assert_eq!(cluster.valid().unwrap(), other.valid().unwrap());
        assert_eq!(cluster.server_roles(), other.server_roles());
    }
}

#[test]
fn validator_runtime_error_aborts_the_load() {
    struct Broken;

    impl Validator for Broken {
        fn kind(&self) -> &'static str {
            "broken"
        }

        fn validate(&self) -> Result<bool> {
            Err(ClusterKitError::validator_runtime("broken", "probe failed"))
        }
    }

    fn broken(_cfg: &ComponentConfig) -> Result<Box<dyn Validator>> {
        Ok(Box::new(Broken))
    }

    let yaml = r#"
v1:
  osc:
    title: "Owens"
    validators:
      gate:
        type: "broken"
"#;

    let mut resolver = TypeResolver::with_builtins();
    resolver.register_validator("broken", broken);
    let registry = ClusterRegistry::new(resolver);

    // A crashing validator is an error, not a quietly-invalid cluster.
    let err = registry.all_from_str(yaml, false).unwrap_err();
    assert!(matches!(err, ClusterKitError::ValidatorRuntime { .. }));
}

#[test]
fn load_from_file() {
    let yaml = r#"
v1:
  pitzer:
    title: "Pitzer"
    servers:
      login:
        type: "ssh_server"
        host: "pitzer.osc.edu"
        port: 2222
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let registry = ClusterRegistry::default();
    let clusters = registry.all(file.path(), false).unwrap();

    let pitzer = clusters.get("pitzer").unwrap();
    let login = pitzer.server("login").unwrap();
    let ssh = login
        .as_any()
        .downcast_ref::<crate::server::SshServer>()
        .unwrap();
    assert_eq!(ssh.connect_spec(), "pitzer.osc.edu:2222");
}

#[test]
fn multiple_validators_all_must_pass() {
    let yaml = r#"
v1:
  osc:
    title: "Owens"
    validators:
      first:
        type: "always_true"
      second:
        type: "always_false"
      third:
        type: "always_true"
"#;

    let registry = registry_with_test_validators();

    let clusters = registry.all_from_str(yaml, true).unwrap();
    assert!(!clusters.get("osc").unwrap().valid().unwrap());
}

#[test]
fn registry_result_can_be_summarized() {
    let yaml = r#"
v1:
  osc:
    title: "Owens"
    servers:
      login:
        type: "ssh_server"
        host: "owens.osc.edu"
      status:
        type: "web_server"
        host: "status.osc.edu"
"#;

    let registry = ClusterRegistry::default();
    let clusters = registry.all_from_str(yaml, false).unwrap();

    let summary = clusters.get("osc").unwrap().summarize().unwrap();
    assert!(summary.valid);
    assert_eq!(summary.servers.len(), 2);
    assert_eq!(summary.servers[0].role, "login");
    assert_eq!(summary.servers[1].role, "status");
}

#[test]
fn programmatic_cluster_construction() {
    // The registry is the usual entry point, but Cluster::from_config is a
    // public seam for embedding applications.
    let config = crate::config::ClusterConfig {
        title: "Ad-hoc".to_string(),
        hpc_cluster: false,
        validators: HashMap::new(),
        servers: HashMap::from([(
            "files".to_string(),
            ComponentConfig::new("web_server").with_option("host", "files.osc.edu"),
        )]),
    };

    let resolver = TypeResolver::with_builtins();
    let cluster = Cluster::from_config("adhoc", &config, &resolver).unwrap();

    assert!(!cluster.is_hpc_cluster());
    assert!(cluster.has_server_by_role("files"));
}
