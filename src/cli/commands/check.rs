//! Check command implementation.
//!
//! The `weaver-boot check` command probes every required module and
//! reports what is missing. It never installs anything.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::error::{BootError, Result};
use crate::requirements::installer::pip_hint;
use crate::requirements::{report_missing, DependencyChecker};
use crate::ui::UserInterface;

use super::context::{BootContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    globals: GlobalOptions,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, globals: GlobalOptions, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            globals,
            args,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = BootContext::load(&self.project_root, &self.globals, &self.args.modules)?;
        let probe = ctx.probe();
        let mut checker = DependencyChecker::new(&probe);
        let modules = ctx.modules();

        if self.args.json {
            let report = checker.check(&modules)?;
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| BootError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::from_ok(report.all_available()));
        }

        ui.message("Checking dependencies...");
        let report = checker.check_and_report(&modules, ui)?;

        if report.all_available() {
            ui.message("");
            ui.success("All required dependencies are installed!");
            return Ok(CommandResult::success());
        }

        report_missing(&report, ui);
        ui.message("");
        ui.message("Please install missing packages with:");
        ui.message(&pip_hint(&report.missing_packages()));
        Ok(CommandResult::failure(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::ModuleArgs;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn empty_module_list_passes_without_interpreter() {
        let temp = TempDir::new().unwrap();
        let globals = GlobalOptions {
            python: Some("definitely-not-python-xyz".to_string()),
            ..Default::default()
        };
        let args = CheckArgs {
            modules: ModuleArgs {
                modules: Vec::new(),
                profile: Some(crate::config::ModuleProfile::None),
            },
            json: false,
        };
        let cmd = CheckCommand::new(temp.path(), globals, args);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.succeeded());
        assert!(ui.has_success("All required dependencies are installed!"));
    }

    #[test]
    fn missing_interpreter_is_an_error() {
        let temp = TempDir::new().unwrap();
        let globals = GlobalOptions {
            python: Some("definitely-not-python-xyz".to_string()),
            ..Default::default()
        };
        let args = CheckArgs {
            modules: ModuleArgs {
                modules: vec!["fastapi".to_string()],
                profile: None,
            },
            json: false,
        };
        let cmd = CheckCommand::new(temp.path(), globals, args);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui);
        assert!(matches!(result, Err(BootError::InterpreterNotFound { .. })));
    }
}
