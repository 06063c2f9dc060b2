//! clusterkit - Cluster registry for HPC web portals
//!
//! Entry point for the clusterkit command-line tool.

use clap::Parser;
use clusterkit::cli::{Cli, Commands, ConfigCommands, ListArgs, OutputFormat, ShowArgs};
use clusterkit::config::RegistryDocument;
use clusterkit::error::exit_code;
use clusterkit::{Cluster, ClusterKitError, ClusterRegistry, ClusterSummary};
use std::process::ExitCode;
use tracing::Level;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::from(exit_code::GENERAL_ERROR as u8);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = %e.code(), "{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Initialize the tracing subscriber based on CLI options.
fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (level_str, _is_quiet) = cli.log_level();

    let level = match level_str {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    Ok(())
}

/// Main application logic.
fn run(cli: Cli) -> clusterkit::Result<()> {
    match &cli.command {
        Commands::List(args) => cmd_list(&cli, args),
        Commands::Show(args) => cmd_show(&cli, args),
        Commands::Config(subcmd) => cmd_config(&cli, subcmd),
    }
}

/// Handle the `list` command.
fn cmd_list(cli: &Cli, args: &ListArgs) -> clusterkit::Result<()> {
    let path = RegistryDocument::resolve_path(cli.config.as_deref());
    tracing::debug!(path = %path.display(), force = args.force, "Loading cluster registry");

    let registry = ClusterRegistry::default();
    let clusters = registry.all(&path, args.force)?;

    let mut summaries = summarize_all(clusters.values())?;
    summaries.sort_by(|a, b| a.name.cmp(&b.name));

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Text => {
            if summaries.is_empty() {
                println!("No accessible clusters");
                return Ok(());
            }

            for summary in &summaries {
                let marker = if summary.valid { "✓" } else { "✗" };
                let kind = if summary.hpc_cluster { "hpc" } else { "non-hpc" };
                println!("{} {} ({}, {})", marker, summary.name, summary.title, kind);
                for server in &summary.servers {
                    match &server.host {
                        Some(host) => println!("    {}: {} [{}]", server.role, host, server.kind),
                        None => println!("    {}: [{}]", server.role, server.kind),
                    }
                }
            }
        }
    }

    Ok(())
}

/// Handle the `show` command.
fn cmd_show(cli: &Cli, args: &ShowArgs) -> clusterkit::Result<()> {
    let path = RegistryDocument::resolve_path(cli.config.as_deref());

    // Load with force so a gated cluster can still be inspected.
    let registry = ClusterRegistry::default();
    let clusters = registry.all(&path, true)?;

    let cluster = clusters
        .get(&args.cluster)
        .ok_or_else(|| ClusterKitError::ClusterNotFound {
            cluster: args.cluster.clone(),
        })?;

    let summary = cluster.summarize()?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!("Cluster: {}", summary.name);
            println!("Title: {}", summary.title);
            println!("HPC cluster: {}", if summary.hpc_cluster { "yes" } else { "no" });
            println!("Accessible: {}", if summary.valid { "yes" } else { "no" });

            if !cluster.validator_names().is_empty() {
                println!("Validators: {}", cluster.validator_names().join(", "));
            }

            if !summary.servers.is_empty() {
                println!("Servers:");
                for server in &summary.servers {
                    match &server.host {
                        Some(host) => println!("  {}: {} [{}]", server.role, host, server.kind),
                        None => println!("  {}: [{}]", server.role, server.kind),
                    }
                }
            }
        }
    }

    Ok(())
}

/// Handle the `config` subcommand.
fn cmd_config(cli: &Cli, subcmd: &ConfigCommands) -> clusterkit::Result<()> {
    match subcmd {
        ConfigCommands::Validate => {
            let path = RegistryDocument::resolve_path(cli.config.as_deref());
            let registry = ClusterRegistry::default();

            // Forced load constructs every cluster, surfacing unknown types
            // and malformed entries without validator gating.
            match registry.all(&path, true) {
                Ok(clusters) => {
                    println!("✓ Configuration is valid ({} clusters)", clusters.len());
                    Ok(())
                }
                Err(e) => {
                    println!("✗ Configuration is invalid: {}", e);
                    Err(e)
                }
            }
        }
    }
}

/// Summarizes every cluster, propagating validator runtime errors.
fn summarize_all<'a>(
    clusters: impl Iterator<Item = &'a Cluster>,
) -> clusterkit::Result<Vec<ClusterSummary>> {
    clusters.map(|c| c.summarize()).collect()
}
