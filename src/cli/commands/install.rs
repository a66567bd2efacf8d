//! Install command implementation.
//!
//! The `weaver-boot install` command probes every required module,
//! installs the missing ones in a single installer run, and re-probes
//! each of them.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::config::RemediationPolicy;
use crate::error::{BootError, Result};
use crate::requirements::{remediate, DependencyChecker, PipInstaller, RemediationResult};
use crate::ui::UserInterface;

use super::context::{BootContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    project_root: PathBuf,
    globals: GlobalOptions,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(project_root: &Path, globals: GlobalOptions, args: InstallArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            globals,
            args,
        }
    }

    /// Installing is what was asked for, so `report` is never in effect here.
    fn policy(&self) -> RemediationPolicy {
        if self.args.user {
            RemediationPolicy::InstallUser
        } else {
            RemediationPolicy::Install
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut ctx = BootContext::load(&self.project_root, &self.globals, &self.args.modules)?;
        let policy = self.policy();
        {
            let remediation = &mut ctx.config_mut().remediation;
            remediation.policy = policy;
            if self.args.no_cache {
                remediation.no_cache = true;
            }
        }

        let probe = ctx.probe();
        let installer = PipInstaller::from_config(
            ctx.python(),
            &ctx.config().remediation,
            Some(ctx.project_root()),
        );
        let mut checker = DependencyChecker::new(&probe);

        ui.message("Checking dependencies...");
        let report = checker.check_and_report(&ctx.modules(), ui)?;

        match remediate(&report, &mut checker, &installer, policy, true, ui) {
            Ok(RemediationResult::AlreadySatisfied) | Ok(RemediationResult::Installed { .. }) => {
                ui.message("");
                ui.success("All required dependencies are installed!");
                Ok(CommandResult::success())
            }
            Err(BootError::DependenciesMissing { .. }) | Err(BootError::InstallFailed { .. }) => {
                ui.error("Failed to install all required dependencies.");
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
