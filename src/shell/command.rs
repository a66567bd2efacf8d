//! Child process execution.
//!
//! Every interaction with the interpreter (probing, installing, launching)
//! goes through these helpers. Programs are spawned directly with an argv,
//! never through a shell, so module and package names are passed verbatim.

use crate::error::{BootError, Result};
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of executing a child process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the process succeeded (exit code 0).
    pub success: bool,
}

impl ProcessOutput {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Last non-empty line of stderr, trimmed.
    pub fn last_stderr_line(&self) -> Option<&str> {
        self.stderr
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .last()
    }
}

/// Options for process execution.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl ProcessOptions {
    /// Options that capture both streams, run from `cwd`.
    pub fn captured(cwd: Option<&Path>) -> Self {
        Self {
            cwd: cwd.map(Path::to_path_buf),
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }
}

/// Output line from process execution.
#[derive(Debug, Clone)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Callback for streaming output.
pub type OutputCallback = Box<dyn Fn(OutputLine) + Send>;

/// Render a program and its arguments for messages and logs.
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut parts = vec![program.to_string()];
    for arg in args {
        if arg.contains(char::is_whitespace) || arg.contains('\n') {
            parts.push(format!("{:?}", arg));
        } else {
            parts.push(arg.clone());
        }
    }
    parts.join(" ")
}

fn build_command(program: &str, args: &[String], options: &ProcessOptions) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd
}

/// Execute a program and wait for it to exit.
///
/// Returns `Err(Io)` only when the program cannot be spawned; a non-zero
/// exit is reported through [`ProcessOutput::success`].
pub fn execute(program: &str, args: &[String], options: &ProcessOptions) -> Result<ProcessOutput> {
    let start = Instant::now();
    let mut cmd = build_command(program, args, options);

    cmd.stdin(Stdio::inherit());
    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    tracing::debug!(command = %display_command(program, args), "spawning");
    let output = cmd.output()?;
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if output.status.success() {
        Ok(ProcessOutput::success(stdout, stderr, duration))
    } else {
        Ok(ProcessOutput::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a program with streaming output.
pub fn execute_streaming(
    program: &str,
    args: &[String],
    options: &ProcessOptions,
    callback: OutputCallback,
) -> Result<ProcessOutput> {
    let start = Instant::now();
    let mut cmd = build_command(program, args, options);

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!(command = %display_command(program, args), "spawning (streaming)");
    let mut child = cmd.spawn()?;

    let command_text = display_command(program, args);
    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Err(BootError::CommandFailed {
            command: command_text,
            code: None,
        });
    };

    let (tx, rx) = mpsc::channel();
    let tx_stdout = tx.clone();
    let tx_stderr = tx;

    let stdout_handle = thread::spawn(move || {
        let reader = BufReader::new(stdout);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
            let _ = tx_stdout.send(OutputLine::Stdout(line));
        }
        output
    });

    let stderr_handle = thread::spawn(move || {
        let reader = BufReader::new(stderr);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
            let _ = tx_stderr.send(OutputLine::Stderr(line));
        }
        output
    });

    for line in rx {
        callback(line);
    }

    let stdout_output = stdout_handle.join().unwrap_or_default();
    let stderr_output = stderr_handle.join().unwrap_or_default();

    let status = child.wait().map_err(|_| BootError::CommandFailed {
        command: command_text,
        code: None,
    })?;

    let duration = start.elapsed();

    if status.success() {
        Ok(ProcessOutput::success(stdout_output, stderr_output, duration))
    } else {
        Ok(ProcessOutput::failure(
            status.code(),
            stdout_output,
            stderr_output,
            duration,
        ))
    }
}

/// Replace the current process image with `program`.
///
/// Only returns on failure.
#[cfg(unix)]
pub fn replace_process(program: &str, args: &[String], options: &ProcessOptions) -> BootError {
    use std::os::unix::process::CommandExt;

    let mut cmd = build_command(program, args, options);
    tracing::debug!(command = %display_command(program, args), "exec");
    BootError::Io(cmd.exec())
}
