//! Configuration loading, parsing, and validation for weaver-boot.
//!
//! # Example
//!
//! ```
//! use weaver_boot::config::{load_merged_config, validate, LaunchStrategy};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let weaver_dir = temp.path().join(".weaver");
//! fs::create_dir_all(&weaver_dir).unwrap();
//! fs::write(weaver_dir.join("boot.yml"), "launch:\n  strategy: spawn\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.launch.strategy, LaunchStrategy::Spawn);
//! ```
//!
//! # Configuration File Locations
//!
//! weaver-boot discovers and merges configuration in this order:
//! 1. User global config (`~/.weaver/boot.yml`)
//! 2. Project config (`.weaver/boot.yml`)
//! 3. Local overrides (`.weaver/boot.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use schema::{
    BootConfig, LaunchConfig, LaunchStrategy, ModuleProfile, ModuleSpec, RemediationConfig,
    RemediationPolicy, SmokeCheck,
};

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, ConfigPaths,
};

pub use merger::{deep_merge, merge_configs};

pub use validator::{validate, validate_config, ValidationError};
