//! Interpreter diagnostics and smoke checks.

use crate::config::SmokeCheck;
use crate::error::{BootError, Result};
use crate::requirements::probe::interpreter_error;
use crate::shell::{execute, ProcessOptions};
use crate::ui::{StatusKind, UserInterface};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// Prints interpreter facts as one JSON object on stdout.
pub const INFO_SCRIPT: &str =
    "import json, sys; print(json.dumps({'version': sys.version, 'executable': sys.executable, 'path': sys.path}))";

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)").expect("version pattern compiles"));

/// What the configured interpreter reports about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterInfo {
    /// Full `sys.version` string
    pub version: String,
    /// `sys.executable`
    pub executable: String,
    /// Module search path, in order
    pub path: Vec<String>,
}

impl InterpreterInfo {
    /// Ask `python` about itself.
    pub fn query(python: &str, cwd: Option<&Path>) -> Result<Self> {
        let args = vec!["-c".to_string(), INFO_SCRIPT.to_string()];
        let output = execute(python, &args, &ProcessOptions::captured(cwd))
            .map_err(|e| interpreter_error(python, e))?;

        if !output.success {
            return Err(BootError::InterpreterNotFound {
                python: python.to_string(),
                message: output
                    .last_stderr_line()
                    .unwrap_or("interpreter query failed")
                    .to_string(),
            });
        }

        Self::parse(&output.stdout)
    }

    /// Parse the JSON printed by [`INFO_SCRIPT`].
    pub fn parse(stdout: &str) -> Result<Self> {
        let line = stdout.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
        serde_json::from_str(line)
            .map_err(|e| anyhow::anyhow!("unexpected interpreter report: {}", e).into())
    }

    /// `(major, minor, patch)` parsed from the version string.
    pub fn version_triple(&self) -> Option<(u32, u32, u32)> {
        let caps = VERSION_REGEX.captures(self.version.trim())?;
        Some((
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        ))
    }

    /// Print the `Python path:` and `Python version:` blocks.
    pub fn report(&self, ui: &mut dyn UserInterface) {
        ui.message("");
        ui.message("Python path:");
        for entry in &self.path {
            ui.message(&format!("  {}", entry));
        }
        ui.message("");
        ui.message(&format!("Python version: {}", self.version));
    }
}

/// Outcome of one smoke check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeResult {
    pub name: String,
    pub passed: bool,
    pub message: Option<String>,
}

/// Run each smoke check in order, printing one status line per check.
///
/// A failing snippet is an `Ok` result with `passed == false`.
pub fn run_smoke_checks(
    python: &str,
    cwd: Option<&Path>,
    checks: &[SmokeCheck],
    ui: &mut dyn UserInterface,
) -> Result<Vec<SmokeResult>> {
    let mut results = Vec::with_capacity(checks.len());

    for check in checks {
        let args = vec!["-c".to_string(), check.code.clone()];
        let output = execute(python, &args, &ProcessOptions::captured(cwd))
            .map_err(|e| interpreter_error(python, e))?;

        let result = if output.success {
            ui.status(StatusKind::Success, &check.name);
            SmokeResult {
                name: check.name.clone(),
                passed: true,
                message: None,
            }
        } else {
            let message = output
                .last_stderr_line()
                .map(str::to_string)
                .unwrap_or_else(|| format!("exited with code {:?}", output.exit_code));
            ui.status(StatusKind::Failed, &format!("{}: {}", check.name, message));
            SmokeResult {
                name: check.name.clone(),
                passed: false,
                message: Some(message),
            }
        };
        tracing::debug!(check = %result.name, passed = result.passed, "smoke check");
        results.push(result);
    }

    Ok(results)
}
