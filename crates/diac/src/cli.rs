//! The `diac` command
//!
//! Operates on an existing cache directory: compile what the module
//! snapshot describes, list units, print one unit as code.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use diac_domain::DependencyKey;
use diac_domain::ports::{DescriptorIntrospector, InjectorCapability};
use diac_infrastructure::config::{AppConfig, ConfigLoader};
use diac_infrastructure::{AppContext, init_app};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command line interface for diac
#[derive(Parser, Debug)]
#[command(name = "diac")]
#[command(about = "diac - Ahead-of-time compiler for dependency-injection binding graphs")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Cache directory, overriding the configuration
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compile every snapshot binding that has no unit yet
    Compile,
    /// List the unit tokens in the cache
    List,
    /// Print the unit of one key as code
    Show {
        /// Interface name of the key
        interface: String,
        /// Qualifier; omit for the unqualified binding
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Summarize the module snapshot
    Snapshot,
}

impl Cli {
    /// Configuration from `--config` (or the default locations) and the environment
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::new().with_config_path(path),
            None => ConfigLoader::new(),
        };
        let mut config = loader.load().context("Failed to load configuration")?;
        if let Some(cache_dir) = &self.cache_dir {
            config.compiler.cache_dir.clone_from(cache_dir);
        }
        Ok(config)
    }
}

/// Run `cli` against `config`, writing results to `out`
pub fn run(cli: &Cli, config: AppConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let context = init_app(config)?;
    match &cli.command {
        Command::Compile => compile(&context, out),
        Command::List => list(&context, out),
        Command::Show { interface, name } => {
            let key = match name {
                Some(name) => DependencyKey::named(interface.as_str(), name.as_str()),
                None => DependencyKey::new(interface.as_str()),
            };
            show(&context, &key, out)
        }
        Command::Snapshot => snapshot(&context, out),
    }
}

fn compile(context: &AppContext, out: &mut dyn Write) -> anyhow::Result<()> {
    let report = context
        .driver(Arc::new(DescriptorIntrospector))
        .recompile_from_snapshot(InjectorCapability::Interpreted)
        .with_context(|| {
            format!(
                "Compilation into {} failed",
                context.file_store().root().display()
            )
        })?;
    info!(compiled = report.compiled.len(), "Compile command finished");
    for key in &report.compiled {
        writeln!(out, "compiled {key}")?;
    }
    writeln!(
        out,
        "{} compiled, {} already present",
        report.compiled.len(),
        report.skipped.len()
    )?;
    Ok(())
}

fn list(context: &AppContext, out: &mut dyn Write) -> anyhow::Result<()> {
    for token in context.store().list_units()? {
        writeln!(out, "{token}")?;
    }
    Ok(())
}

fn show(context: &AppContext, key: &DependencyKey, out: &mut dyn Write) -> anyhow::Result<()> {
    let Some(unit) = context.store().read_unit(key)? else {
        bail!(
            "no unit for {key} in {}",
            context.file_store().root().display()
        );
    };
    write!(out, "{unit}")?;
    Ok(())
}

fn snapshot(context: &AppContext, out: &mut dyn Write) -> anyhow::Result<()> {
    let Some(snapshot) = context.store().read_snapshot()? else {
        bail!(
            "no module snapshot in {}",
            context.file_store().root().display()
        );
    };
    writeln!(
        out,
        "format {} generated {} ({} bindings)",
        snapshot.format_version,
        snapshot.generated_at.to_rfc3339(),
        snapshot.len()
    )?;
    for entry in &snapshot.bindings {
        writeln!(out, "{} -> {}", entry.key, entry.binding.describe())?;
    }
    Ok(())
}
