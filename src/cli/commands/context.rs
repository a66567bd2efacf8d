//! Shared setup for the dependency commands.
//!
//! Every command that touches the interpreter starts the same way: load
//! the layered configuration, apply command-line overrides, validate the
//! result, and build a probe rooted at the project.

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, ModuleArgs};
use crate::config::{load_config, validate, BootConfig, ModuleProfile, ModuleSpec};
use crate::error::Result;
use crate::requirements::PythonProbe;

/// Global flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// `--config` file, loaded instead of the layered files
    pub config: Option<PathBuf>,
    /// `--python` override
    pub python: Option<String>,
    /// `--yes`
    pub assume_yes: bool,
}

impl GlobalOptions {
    /// Extract the global flags from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            python: cli.python.clone(),
            assume_yes: cli.yes,
        }
    }
}

/// Resolved configuration for one command run.
#[derive(Debug, Clone)]
pub struct BootContext {
    project_root: PathBuf,
    config: BootConfig,
    assume_yes: bool,
}

impl BootContext {
    /// Load and validate configuration for `project_root`.
    ///
    /// `--module` replaces the configured list (the profile is dropped
    /// unless `--profile` is also given); `--profile` alone swaps the
    /// built-in set and keeps configured extras.
    pub fn load(
        project_root: &Path,
        globals: &GlobalOptions,
        selection: &ModuleArgs,
    ) -> Result<Self> {
        let mut config = load_config(project_root, globals.config.as_deref())?;

        if let Some(python) = &globals.python {
            config.python = python.clone();
        }
        apply_selection(&mut config, selection);
        validate(&config)?;

        tracing::debug!(
            python = %config.python,
            modules = config.required_modules().len(),
            "resolved configuration"
        );

        Ok(Self {
            project_root: project_root.to_path_buf(),
            config,
            assume_yes: globals.assume_yes,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BootConfig {
        &mut self.config
    }

    pub fn python(&self) -> &str {
        &self.config.python
    }

    pub fn assume_yes(&self) -> bool {
        self.assume_yes
    }

    /// The ordered modules to check.
    pub fn modules(&self) -> Vec<ModuleSpec> {
        self.config.required_modules()
    }

    /// A probe for the configured interpreter, run from the project root.
    pub fn probe(&self) -> PythonProbe {
        PythonProbe::new(self.python(), Some(&self.project_root))
    }
}

fn apply_selection(config: &mut BootConfig, selection: &ModuleArgs) {
    if !selection.modules.is_empty() {
        config.modules = selection.specs();
        config.profile = selection.profile.unwrap_or(ModuleProfile::None);
    } else if let Some(profile) = selection.profile {
        config.profile = profile;
    }
}
