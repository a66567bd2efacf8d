//! Application hand-off.
//!
//! Once every required module imports, the [`Launcher`] transfers control
//! to the application using one of three strategies:
//!
//! - [`LaunchStrategy::Run`] executes the file as `__main__`
//! - [`LaunchStrategy::Entrypoint`] imports it and calls its entry point;
//!   the launch script runs the file as a script when there is none
//! - [`LaunchStrategy::Spawn`] runs the file as a standalone script
//!
//! The application's exit code is returned to the caller unchanged.

pub mod scripts;

use crate::config::{LaunchConfig, LaunchStrategy};
use crate::error::{BootError, Result};
use crate::shell::{display_command, execute, ProcessOptions};
use scripts::{ENTRYPOINT_SCRIPT, RUN_SCRIPT};
use std::path::{Path, PathBuf};

/// How a launch finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub strategy: LaunchStrategy,
    /// The application's exit code
    pub exit_code: i32,
}

impl LaunchOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Hands control to the application.
#[derive(Debug, Clone)]
pub struct Launcher {
    python: String,
    project_root: PathBuf,
    config: LaunchConfig,
}

impl Launcher {
    /// Create a launcher for `config`, resolving paths against `project_root`.
    pub fn new(python: impl Into<String>, project_root: &Path, config: LaunchConfig) -> Self {
        Self {
            python: python.into(),
            project_root: project_root.to_path_buf(),
            config,
        }
    }

    /// Directory the application runs in.
    pub fn working_dir(&self) -> PathBuf {
        match &self.config.working_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.project_root.join(dir),
            None => self.project_root.clone(),
        }
    }

    /// Absolute path of the application file.
    pub fn app_path(&self) -> PathBuf {
        if self.config.app.is_absolute() {
            self.config.app.clone()
        } else {
            self.working_dir().join(&self.config.app)
        }
    }

    /// Display name of the application file.
    pub fn app_name(&self) -> String {
        self.config.app.display().to_string()
    }

    /// Interpreter arguments for `strategy`, with `args` passed through.
    pub fn argv(&self, strategy: LaunchStrategy, args: &[String]) -> Vec<String> {
        let app = self.app_path().display().to_string();
        let mut argv = match strategy {
            LaunchStrategy::Run => vec!["-c".to_string(), RUN_SCRIPT.to_string(), app],
            LaunchStrategy::Entrypoint => vec![
                "-c".to_string(),
                ENTRYPOINT_SCRIPT.to_string(),
                app,
                self.config.entrypoint.clone(),
            ],
            LaunchStrategy::Spawn => vec![app],
        };
        argv.extend(args.iter().cloned());
        argv
    }

    fn options(&self) -> ProcessOptions {
        ProcessOptions {
            cwd: Some(self.working_dir()),
            env: self
                .config
                .env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            ..Default::default()
        }
    }

    fn handoff_error(&self, message: impl Into<String>) -> BootError {
        BootError::HandoffFailed {
            app: self.app_name(),
            message: message.into(),
        }
    }

    /// Start the application and wait for it to exit.
    ///
    /// With `exec` enabled on unix the interpreter replaces this process
    /// and this only returns on failure.
    ///
    /// # Errors
    ///
    /// `HandoffFailed` if the application file is missing or the
    /// interpreter cannot be started.
    pub fn launch(&self, strategy: LaunchStrategy, args: &[String]) -> Result<LaunchOutcome> {
        let app_path = self.app_path();
        if !app_path.is_file() {
            return Err(self.handoff_error(format!(
                "application file not found: {}",
                app_path.display()
            )));
        }

        tracing::info!(%strategy, app = %app_path.display(), "handing off to application");

        if self.config.exec {
            #[cfg(unix)]
            {
                let err = crate::shell::replace_process(
                    &self.python,
                    &self.argv(strategy, args),
                    &self.options(),
                );
                return Err(self.handoff_error(err.to_string()));
            }
            #[cfg(not(unix))]
            tracing::warn!("exec is only supported on unix; spawning a child instead");
        }

        let exit_code = self.run_child(strategy, args)?;
        Ok(LaunchOutcome {
            strategy,
            exit_code,
        })
    }

    fn run_child(&self, strategy: LaunchStrategy, args: &[String]) -> Result<i32> {
        let argv = self.argv(strategy, args);
        tracing::debug!(command = %display_command(&self.python, &argv), "launching");

        let output = execute(&self.python, &argv, &self.options())
            .map_err(|e| self.handoff_error(e.to_string()))?;

        // A signal-terminated child has no code.
        Ok(output.exit_code.unwrap_or(1))
    }
}
