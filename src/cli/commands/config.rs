//! Config command implementation.
//!
//! The `weaver-boot config` command shows the resolved configuration, or
//! the JSON schema of the config file.

use std::path::{Path, PathBuf};

use crate::cli::args::{ConfigArgs, ModuleArgs};
use crate::config::{BootConfig, ConfigPaths};
use crate::error::{BootError, Result};
use crate::ui::UserInterface;

use super::context::{BootContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    globals: GlobalOptions,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, globals: GlobalOptions, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            globals,
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn sources(&self) -> Vec<PathBuf> {
        match &self.globals.config {
            Some(path) => vec![path.clone()],
            None => ConfigPaths::discover(&self.project_root)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.schema {
            let schema = schemars::schema_for!(BootConfig);
            let json =
                serde_json::to_string_pretty(&schema).map_err(|e| BootError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let ctx = BootContext::load(&self.project_root, &self.globals, &ModuleArgs::default())?;
        let config = ctx.config();

        if self.args.json {
            let json =
                serde_json::to_string_pretty(config).map_err(|e| BootError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        // Show config file path(s)
        let sources = self.sources();
        if sources.is_empty() {
            ui.message("# built-in defaults");
        }
        for path in &sources {
            ui.message(&format!("# {}", path.display()));
        }
        ui.message("");

        let yaml = serde_yaml::to_string(config).map_err(|e| BootError::Other(e.into()))?;
        ui.message(&yaml);

        Ok(CommandResult::success())
    }
}
