//! Doctor command implementation.
//!
//! The `weaver-boot doctor` command shows everything needed to diagnose a
//! broken environment: per-module status, the interpreter's search path
//! and version, and the configured smoke checks. It never installs.

use std::path::{Path, PathBuf};

use crate::cli::args::DoctorArgs;
use crate::error::Result;
use crate::requirements::{report_missing, run_smoke_checks, DependencyChecker, InterpreterInfo};
use crate::ui::UserInterface;

use super::context::{BootContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};

/// The doctor command implementation.
pub struct DoctorCommand {
    project_root: PathBuf,
    globals: GlobalOptions,
    args: DoctorArgs,
}

impl DoctorCommand {
    /// Create a new doctor command.
    pub fn new(project_root: &Path, globals: GlobalOptions, args: DoctorArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            globals,
            args,
        }
    }
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = BootContext::load(&self.project_root, &self.globals, &self.args.modules)?;
        let probe = ctx.probe();
        let mut checker = DependencyChecker::new(&probe);

        ui.show_header("Dependencies");
        let report = checker.check_and_report(&ctx.modules(), ui)?;
        report_missing(&report, ui);

        let info = InterpreterInfo::query(ctx.python(), Some(ctx.project_root()))?;
        info.report(ui);
        if let Some((major, minor, _)) = info.version_triple() {
            if (major, minor) < (3, 8) {
                ui.warning(&format!(
                    "Python {}.{} is older than the application supports",
                    major, minor
                ));
            }
        }

        let mut smoke_ok = true;
        let checks = &ctx.config().smoke;
        if !checks.is_empty() {
            ui.message("");
            ui.show_header("Smoke checks");
            let results =
                run_smoke_checks(ctx.python(), Some(ctx.project_root()), checks, ui)?;
            smoke_ok = results.iter().all(|r| r.passed);
        }

        ui.message("");
        if report.all_available() && smoke_ok {
            ui.success("All required dependencies are installed!");
            Ok(CommandResult::success())
        } else {
            if !report.all_available() {
                ui.error("Some dependencies are missing!");
                ui.show_hint("Run `weaver-boot install` to install them.");
            }
            if !smoke_ok {
                ui.error("Some smoke checks failed!");
            }
            Ok(CommandResult::failure(1))
        }
    }
}
