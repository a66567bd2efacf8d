//! Module probes.
//!
//! A probe answers one question: can the interpreter import this module?
//! [`PythonProbe`] answers it by running a tiny script in a child
//! interpreter, so nothing is imported into (or cached by) this process and
//! a re-probe after installation always sees the current state.

use crate::error::{BootError, Result};
use crate::requirements::status::ModuleStatus;
use crate::shell::{execute, ProcessOptions, ProcessOutput};
use std::path::{Path, PathBuf};

/// Exit code the probe script uses to signal `ImportError`.
pub const IMPORT_ERROR_EXIT: i32 = 3;

/// Script run with `-c`; the module name arrives as `sys.argv[1]`.
pub const PROBE_SCRIPT: &str = "\
import importlib, sys
try:
    importlib.import_module(sys.argv[1])
except ImportError as e:
    sys.stderr.write(str(e) + '\\n')
    sys.exit(3)
";

/// Something that can tell whether a module is importable.
pub trait ModuleProbe {
    /// Probe a single module.
    ///
    /// Returns `Err` only when the probe itself cannot run (for example a
    /// missing interpreter); an unimportable module is an `Ok` status.
    fn probe(&self, module: &str) -> Result<ModuleStatus>;
}

/// Probes modules by spawning the configured interpreter.
#[derive(Debug, Clone)]
pub struct PythonProbe {
    python: String,
    cwd: Option<PathBuf>,
}

impl PythonProbe {
    /// Create a probe for `python`, running from `cwd`.
    ///
    /// The working directory matters: `-c` puts it at the front of
    /// `sys.path`, so project-local modules resolve the same way they do
    /// when the application starts.
    pub fn new(python: impl Into<String>, cwd: Option<&Path>) -> Self {
        Self {
            python: python.into(),
            cwd: cwd.map(Path::to_path_buf),
        }
    }

    /// The interpreter this probe spawns.
    pub fn python(&self) -> &str {
        &self.python
    }
}

impl ModuleProbe for PythonProbe {
    fn probe(&self, module: &str) -> Result<ModuleStatus> {
        let args = vec![
            "-c".to_string(),
            PROBE_SCRIPT.to_string(),
            module.to_string(),
        ];
        let options = ProcessOptions::captured(self.cwd.as_deref());

        let output = execute(&self.python, &args, &options)
            .map_err(|e| interpreter_error(&self.python, e))?;

        let status = classify(module, &output);
        tracing::debug!(module, status = status.label(), "probed module");
        Ok(status)
    }
}

/// Turn a spawn failure of `python` into `InterpreterNotFound`.
pub(crate) fn interpreter_error(python: &str, err: BootError) -> BootError {
    match err {
        BootError::Io(io) => BootError::InterpreterNotFound {
            python: python.to_string(),
            message: io.to_string(),
        },
        other => other,
    }
}

/// Map a probe child's exit status onto a module status.
pub fn classify(module: &str, output: &ProcessOutput) -> ModuleStatus {
    if output.success {
        return ModuleStatus::Available;
    }

    let last_line = output.last_stderr_line().map(str::to_string);

    if output.exit_code == Some(IMPORT_ERROR_EXIT) {
        ModuleStatus::Missing {
            message: last_line.unwrap_or_else(|| format!("No module named '{}'", module)),
        }
    } else {
        ModuleStatus::Broken {
            message: last_line.unwrap_or_else(|| match output.exit_code {
                Some(code) => format!("interpreter exited with code {}", code),
                None => "interpreter was terminated by a signal".to_string(),
            }),
        }
    }
}
