//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - The interpreter must be named
//! - Module names must be non-empty and contain no whitespace
//! - The entry-point attribute must be a valid identifier
//! - Smoke checks need both a name and code

use crate::config::schema::{BootConfig, LaunchStrategy};
use crate::error::{BootError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &BootConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.python.trim().is_empty() {
        errors.push(ValidationError::new(
            "missing-python",
            "'python' must name an interpreter".to_string(),
        ));
    }

    errors.extend(validate_modules(config));
    errors.extend(validate_launch(config));
    errors.extend(validate_smoke(config));

    errors
}

fn validate_modules(config: &BootConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for spec in &config.modules {
        if !is_module_path(&spec.module) {
            errors.push(ValidationError::new(
                "invalid-module",
                format!("'{}' is not a valid module name", spec.module),
            ));
        }
        if let Some(package) = &spec.package {
            if package.trim().is_empty() || package.contains(char::is_whitespace) {
                errors.push(ValidationError::new(
                    "invalid-package",
                    format!(
                        "Module '{}' has an invalid package name '{}'",
                        spec.module, package
                    ),
                ));
            }
        }
    }

    errors
}

fn validate_launch(config: &BootConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let launch = &config.launch;

    if launch.app.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "missing-app",
            "'launch.app' must name the application file".to_string(),
        ));
    }

    if !is_identifier(&launch.entrypoint) {
        errors.push(ValidationError::new(
            "invalid-entrypoint",
            format!(
                "'launch.entrypoint' must be an identifier, got '{}'",
                launch.entrypoint
            ),
        ));
    }

    if launch.strategy == LaunchStrategy::Entrypoint {
        let is_py = launch
            .app
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("py"));
        if !is_py {
            errors.push(ValidationError::new(
                "entrypoint-needs-module",
                format!(
                    "Strategy 'entrypoint' imports the app as a module; '{}' is not a .py file",
                    launch.app.display()
                ),
            ));
        }
    }

    errors
}

fn validate_smoke(config: &BootConfig) -> Vec<ValidationError> {
    config
        .smoke
        .iter()
        .enumerate()
        .filter(|(_, check)| check.name.trim().is_empty() || check.code.trim().is_empty())
        .map(|(idx, _)| {
            ValidationError::new(
                "incomplete-smoke",
                format!("Smoke check #{} needs both 'name' and 'code'", idx + 1),
            )
        })
        .collect()
}

/// `a`, `a.b`, `paho.mqtt` style dotted identifiers.
fn is_module_path(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &BootConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(BootError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
