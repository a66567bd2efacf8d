//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use crate::config::{LaunchStrategy, ModuleProfile, ModuleSpec};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// weaver-boot - Dependency check, install and launch for Dune Weaver.
#[derive(Debug, Parser)]
#[command(name = "weaver-boot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (loads only this file)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Python interpreter to probe, install with and launch
    #[arg(long, global = true, env = "WEAVER_BOOT_PYTHON")]
    pub python: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print errors only
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use defaults, no prompts
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Answer yes to the install confirmation
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Check dependencies and report what is missing
    Check(CheckArgs),

    /// Install missing dependencies
    Install(InstallArgs),

    /// Check, remediate and start the application (default)
    Start(StartArgs),

    /// Show dependencies, interpreter details and smoke checks
    Doctor(DoctorArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Module selection shared by the dependency commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ModuleArgs {
    /// Required module, replacing the configured list (repeatable).
    /// Use `module=package` when the install name differs.
    #[arg(short = 'm', long = "module", value_name = "NAME")]
    pub modules: Vec<String>,

    /// Built-in module profile (core, full, none)
    #[arg(long)]
    pub profile: Option<ModuleProfile>,
}

impl ModuleArgs {
    /// Parsed `--module` values.
    pub fn specs(&self) -> Vec<ModuleSpec> {
        self.modules
            .iter()
            .map(|raw| match raw.split_once('=') {
                Some((module, package)) if !package.is_empty() => {
                    ModuleSpec::with_package(module, package)
                }
                Some((module, _)) => ModuleSpec::new(module),
                None => ModuleSpec::new(raw.as_str()),
            })
            .collect()
    }
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub modules: ModuleArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    #[command(flatten)]
    pub modules: ModuleArgs,

    /// Install into the user site-packages
    #[arg(long)]
    pub user: bool,

    /// Disable the installer's download cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `start` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StartArgs {
    #[command(flatten)]
    pub modules: ModuleArgs,

    /// Hand-off strategy (run, entrypoint, spawn)
    #[arg(long)]
    pub strategy: Option<LaunchStrategy>,

    /// Application file to start
    #[arg(long)]
    pub app: Option<PathBuf>,

    /// Report missing dependencies instead of installing them
    #[arg(long)]
    pub no_install: bool,

    /// Arguments passed to the application
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Arguments for the `doctor` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub modules: ModuleArgs,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long, conflicts_with_all = ["yaml", "schema"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, conflicts_with = "schema")]
    pub yaml: bool,

    /// Print the JSON schema of the config file
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
