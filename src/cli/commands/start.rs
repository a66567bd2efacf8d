//! Start command implementation.
//!
//! The `weaver-boot start` command (the default) verifies dependencies,
//! remediates according to the configured policy, and hands control to
//! the application. The application's exit code becomes ours.

use std::path::{Path, PathBuf};

use crate::cli::args::StartArgs;
use crate::config::RemediationPolicy;
use crate::error::{BootError, Result};
use crate::launcher::Launcher;
use crate::requirements::installer::pip_hint;
use crate::requirements::{remediate, CheckReport, DependencyChecker, PipInstaller};
use crate::ui::UserInterface;

use super::context::{BootContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};

/// The start command implementation.
pub struct StartCommand {
    project_root: PathBuf,
    globals: GlobalOptions,
    args: StartArgs,
}

impl StartCommand {
    /// Create a new start command.
    pub fn new(project_root: &Path, globals: GlobalOptions, args: StartArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            globals,
            args,
        }
    }

    fn context(&self) -> Result<BootContext> {
        let mut ctx = BootContext::load(&self.project_root, &self.globals, &self.args.modules)?;
        let config = ctx.config_mut();
        if self.args.no_install {
            config.remediation.policy = RemediationPolicy::Report;
        }
        if let Some(strategy) = self.args.strategy {
            config.launch.strategy = strategy;
        }
        if let Some(app) = &self.args.app {
            config.launch.app = app.clone();
        }
        Ok(ctx)
    }

    /// Run the check and remediation; `Ok(false)` means the failure
    /// narrative has been printed and the launch must not happen.
    fn ensure_dependencies(&self, ctx: &BootContext, ui: &mut dyn UserInterface) -> Result<bool> {
        let probe = ctx.probe();
        let mut checker = DependencyChecker::new(&probe);
        let remediation = &ctx.config().remediation;

        ui.message("Checking dependencies...");
        let report = checker.check_and_report(&ctx.modules(), ui)?;
        if report.all_available() {
            return Ok(true);
        }

        let installer =
            PipInstaller::from_config(ctx.python(), remediation, Some(ctx.project_root()));
        match remediate(
            &report,
            &mut checker,
            &installer,
            remediation.policy,
            ctx.assume_yes(),
            ui,
        ) {
            Ok(_) => Ok(true),
            Err(BootError::DependenciesMissing { .. }) if !remediation.policy.installs() => {
                report_only_failure(&report, ui);
                Ok(false)
            }
            Err(BootError::DependenciesMissing { .. }) | Err(BootError::InstallFailed { .. }) => {
                ui.error("Failed to install all required dependencies.");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

fn report_only_failure(report: &CheckReport, ui: &mut dyn UserInterface) {
    ui.message("");
    ui.message("Please install missing packages with:");
    ui.message(&pip_hint(&report.missing_packages()));
    ui.error("Cannot start application due to missing dependencies.");
}

impl Command for StartCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.context()?;

        if !self.ensure_dependencies(&ctx, ui)? {
            return Ok(CommandResult::failure(1));
        }

        ui.success("All dependencies are installed! Starting the application...");
        ui.message(&format!("Starting {} application...", ctx.config().app_name));

        let launch = &ctx.config().launch;
        let launcher = Launcher::new(ctx.python(), ctx.project_root(), launch.clone());

        match launcher.launch(launch.strategy, &self.args.args) {
            Ok(outcome) if outcome.success() => Ok(CommandResult::success()),
            Ok(outcome) => {
                tracing::info!(code = outcome.exit_code, "application exited");
                Ok(CommandResult::failure(outcome.exit_code))
            }
            Err(e @ BootError::HandoffFailed { .. }) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
