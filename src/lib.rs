//! weaver-boot - Dependency check, install and launch for Dune Weaver.
//!
//! weaver-boot sits in front of the Dune Weaver Python application. It
//! probes the interpreter for every required module, reports what is
//! missing, optionally installs it with `pip`, re-probes, and then hands
//! control to `app.py`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`launcher`] - Application hand-off strategies
//! - [`requirements`] - Module probes, dependency checks, and remediation
//! - [`shell`] - Child process execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use weaver_boot::config::{ModuleProfile, ModuleSpec};
//!
//! let core = ModuleProfile::Core.modules();
//! assert_eq!(core[0], ModuleSpec::new("fastapi"));
//! assert_eq!(core[5].package_name(), "python-multipart");
//! ```
//!
//! For interpreter-backed checks, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod launcher;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{BootError, Result};
