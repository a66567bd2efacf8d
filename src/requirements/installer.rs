//! Package installation and remediation.
//!
//! Handles remediation of modules that failed to import: report them,
//! optionally ask before installing, run the package installer once for
//! all of them, then re-probe each one individually.

use crate::config::{ModuleSpec, RemediationConfig, RemediationPolicy};
use crate::error::{BootError, Result};
use crate::requirements::checker::{report_missing, DependencyChecker};
use crate::requirements::probe::interpreter_error;
use crate::requirements::status::CheckReport;
use crate::shell::{display_command, execute, execute_streaming, ProcessOptions, ProcessOutput};
use crate::ui::{live_output_callback, Prompt, StatusKind, UserInterface};
use std::path::{Path, PathBuf};

/// Prompt key for the install confirmation.
pub const INSTALL_PROMPT_KEY: &str = "install_missing";

/// Result of one installer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Installer exit code (None if killed by signal).
    pub exit_code: Option<i32>,
    /// Whether the installer exited 0.
    pub success: bool,
}

impl From<&ProcessOutput> for InstallOutcome {
    fn from(output: &ProcessOutput) -> Self {
        Self {
            exit_code: output.exit_code,
            success: output.success,
        }
    }
}

/// An external package manager.
pub trait PackageInstaller {
    /// Install all `packages` in one invocation.
    ///
    /// A non-zero exit is an `Ok` outcome with `success == false`; `Err`
    /// means the installer could not be started at all.
    fn install(&self, packages: &[String], ui: &mut dyn UserInterface) -> Result<InstallOutcome>;

    /// The command line `install` would run, for logs and messages.
    fn command_line(&self, packages: &[String]) -> String;
}

/// Installs packages with `<python> -m pip install`.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    python: String,
    cwd: Option<PathBuf>,
    user: bool,
    no_cache: bool,
    extra_args: Vec<String>,
}

impl PipInstaller {
    /// Create an installer for `python` with no extra flags.
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            cwd: None,
            user: false,
            no_cache: false,
            extra_args: Vec::new(),
        }
    }

    /// Build an installer from the remediation settings.
    pub fn from_config(python: &str, config: &RemediationConfig, cwd: Option<&Path>) -> Self {
        Self {
            python: python.to_string(),
            cwd: cwd.map(Path::to_path_buf),
            user: config.policy.user_scoped(),
            no_cache: config.no_cache,
            extra_args: config.extra_args.clone(),
        }
    }

    /// Install into the user site-packages.
    pub fn with_user(mut self, user: bool) -> Self {
        self.user = user;
        self
    }

    /// Disable pip's download cache.
    pub fn with_no_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }

    /// Extra arguments placed before the package names.
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    /// Full argument vector passed to the interpreter.
    pub fn args(&self, packages: &[String]) -> Vec<String> {
        let mut args: Vec<String> = vec!["-m".into(), "pip".into(), "install".into()];
        if self.no_cache {
            args.push("--no-cache-dir".into());
        }
        if self.user {
            args.push("--user".into());
        }
        args.extend(self.extra_args.iter().cloned());
        args.extend(packages.iter().cloned());
        args
    }
}

impl PackageInstaller for PipInstaller {
    fn install(&self, packages: &[String], ui: &mut dyn UserInterface) -> Result<InstallOutcome> {
        let args = self.args(packages);
        tracing::info!(command = %display_command(&self.python, &args), "installing packages");

        let options = ProcessOptions {
            cwd: self.cwd.clone(),
            ..Default::default()
        };

        if ui.output_mode().streams_child_output() {
            let output = execute(&self.python, &args, &options)
                .map_err(|e| interpreter_error(&self.python, e))?;
            return Ok(InstallOutcome::from(&output));
        }

        let base = format!("Installing {}...", packages.join(", "));
        let mut spinner = ui.start_spinner(&base);
        let callback = match spinner.progress_bar() {
            Some(bar) => live_output_callback(bar, base, 2, 2),
            None => Box::new(|_| {}),
        };

        let output = match execute_streaming(&self.python, &args, &options, callback) {
            Ok(output) => output,
            Err(e) => {
                spinner.finish_error("Installer could not be started");
                return Err(interpreter_error(&self.python, e));
            }
        };

        if output.success {
            spinner.finish_success(&format!("Installed {}", packages.join(", ")));
        } else {
            spinner.finish_error(&format!(
                "Installer exited with code {}",
                output
                    .exit_code
                    .map_or_else(|| "?".to_string(), |c| c.to_string())
            ));
            if let Some(line) = output.last_stderr_line() {
                ui.message(&format!("  {}", line));
            }
        }

        Ok(InstallOutcome::from(&output))
    }

    fn command_line(&self, packages: &[String]) -> String {
        display_command(&self.python, &self.args(packages))
    }
}

/// The conventional hint shown when installation is left to the user.
pub fn pip_hint(packages: &[String]) -> String {
    format!("pip install {}", packages.join(" "))
}

/// How remediation ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationResult {
    /// Nothing was missing.
    AlreadySatisfied,
    /// Missing packages were installed and every module now imports.
    Installed {
        /// Packages handed to the installer
        packages: Vec<String>,
    },
}

/// Remediate the missing modules in `report` according to `policy`.
///
/// # Errors
///
/// - `DependenciesMissing` if the policy forbids installing, the user
///   declines, or a module still fails to import after installation.
/// - `InstallFailed` if the installer exits non-zero. No retry is made.
pub fn remediate(
    report: &CheckReport,
    checker: &mut DependencyChecker<'_>,
    installer: &dyn PackageInstaller,
    policy: RemediationPolicy,
    assume_yes: bool,
    ui: &mut dyn UserInterface,
) -> Result<RemediationResult> {
    if report.all_available() {
        return Ok(RemediationResult::AlreadySatisfied);
    }

    let missing = report.missing_specs();
    let modules: Vec<String> = missing.iter().map(|s| s.module.clone()).collect();
    let packages = report.missing_packages();

    report_missing(report, ui);

    if !policy.installs() {
        tracing::info!(?modules, "remediation policy is report; not installing");
        return Err(BootError::DependenciesMissing { modules });
    }

    if !assume_yes && !confirm_install(&packages, ui)? {
        tracing::info!("installation declined");
        return Err(BootError::DependenciesMissing { modules });
    }

    ui.message("");
    ui.message("Attempting to install missing packages...");
    tracing::debug!(command = %installer.command_line(&packages), "running installer");

    let outcome = installer.install(&packages, ui)?;
    if !outcome.success {
        ui.error("Failed to install missing packages.");
        return Err(BootError::InstallFailed {
            packages,
            code: outcome.exit_code,
        });
    }
    ui.success("Installation successful!");

    let still_missing = reverify(&missing, checker, ui)?;
    if still_missing.is_empty() {
        Ok(RemediationResult::Installed { packages })
    } else {
        Err(BootError::DependenciesMissing {
            modules: still_missing,
        })
    }
}

fn confirm_install(packages: &[String], ui: &mut dyn UserInterface) -> Result<bool> {
    let prompt = Prompt::confirm(
        INSTALL_PROMPT_KEY,
        format!("Install {}?", packages.join(", ")),
        true,
    );
    Ok(ui.prompt(&prompt)?.as_bool().unwrap_or(false))
}

/// Re-probe each previously missing module, returning those still missing.
fn reverify(
    missing: &[ModuleSpec],
    checker: &mut DependencyChecker<'_>,
    ui: &mut dyn UserInterface,
) -> Result<Vec<String>> {
    let mut still_missing = Vec::new();
    for spec in missing {
        checker.invalidate(&spec.module);
        if checker.check_one(&spec.module)?.is_available() {
            ui.status(
                StatusKind::Success,
                &format!("{} is now installed", spec.module),
            );
        } else {
            ui.status(
                StatusKind::Failed,
                &format!("{} is still not installed", spec.module),
            );
            still_missing.push(spec.module.clone());
        }
    }
    Ok(still_missing)
}
