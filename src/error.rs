//! Error types for weaver-boot operations.
//!
//! This module defines [`BootError`], the primary error type used throughout
//! the launcher, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - `DependenciesMissing`, `InstallFailed` and `HandoffFailed` are the three
//!   domain failures; commands report them and exit with status 1
//! - Use `anyhow::Error` (via `BootError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for weaver-boot operations.
#[derive(Debug, Error)]
pub enum BootError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The configured interpreter could not be spawned.
    #[error("Python interpreter '{python}' could not be started: {message}")]
    InterpreterNotFound { python: String, message: String },

    /// One or more required modules are not importable.
    #[error("Missing required modules: {}", .modules.join(", "))]
    DependenciesMissing { modules: Vec<String> },

    /// The package installer exited unsuccessfully.
    #[error("Failed to install {}: installer exited with code {code:?}", .packages.join(", "))]
    InstallFailed {
        packages: Vec<String>,
        code: Option<i32>,
    },

    /// Control could not be transferred to the application.
    #[error("Failed to start {app}: {message}")]
    HandoffFailed { app: String, message: String },

    /// Child process failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for weaver-boot operations.
pub type Result<T> = std::result::Result<T, BootError>;
