//! Configuration file discovery and loading.
//!
//! This module handles finding and loading boot files from
//! various locations in the correct priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::BootConfig;
use crate::error::{BootError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project boot files.
pub const CONFIG_DIR: &str = ".weaver";

/// Project boot file name.
pub const CONFIG_FILE: &str = "boot.yml";

/// Local override file name (not meant to be committed).
pub const LOCAL_CONFIG_FILE: &str = "boot.local.yml";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.weaver/boot.yml`)
/// 2. Project config (`.weaver/boot.yml`)
/// 3. Local overrides (`.weaver/boot.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User's global config: ~/.weaver/boot.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .weaver/boot.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .weaver/boot.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: dirs::home_dir()
                .and_then(|home| existing(home.join(CONFIG_DIR).join(CONFIG_FILE))),
            project: existing(project_root.join(CONFIG_DIR).join(CONFIG_FILE)),
            project_local: existing(project_root.join(CONFIG_DIR).join(LOCAL_CONFIG_FILE)),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some() || self.project_local.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.weaver` directory first, then an `app.py` next to which
/// the launcher is expected to run.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join("app.py").is_file() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into BootConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<BootConfig> {
    let value = load_config_value(path)?;
    from_value(value, path)
}

/// Parse YAML content into BootConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<BootConfig> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| BootError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    from_value(value, source_path)
}

/// Load a config file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BootError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BootError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| BootError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// An empty file parses to null; treat it as "all defaults".
fn from_value(value: serde_yaml::Value, source_path: &Path) -> Result<BootConfig> {
    if value.is_null() {
        return Ok(BootConfig::default());
    }
    serde_yaml::from_value(value).map_err(|e| BootError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge all config files for a project.
///
/// Every layer is optional; with no files present the built-in defaults
/// are returned.
///
/// # Errors
///
/// Returns `ConfigParseError` if any config file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<BootConfig> {
    let paths = ConfigPaths::discover(project_root);
    let existing = paths.all_existing();

    if existing.is_empty() {
        tracing::debug!("no boot files found, using defaults");
        return Ok(BootConfig::default());
    }

    let mut layers = Vec::new();
    for path in existing {
        tracing::debug!(path = %path.display(), "loading boot file");
        layers.push(load_config_value(path)?);
    }

    let merged = merge_configs(&layers);
    from_value(merged, &project_root.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<BootConfig> {
    if let Some(override_path) = config_override {
        load_config_file(override_path)
    } else {
        load_merged_config(project_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LaunchStrategy, ModuleProfile, RemediationPolicy};
    use tempfile::TempDir;

    fn write_project_file(temp: &TempDir, name: &str, content: &str) {
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn discover_finds_project_and_local_files() {
        let temp = TempDir::new().unwrap();
        write_project_file(&temp, CONFIG_FILE, "app_name: Sand");
        write_project_file(&temp, LOCAL_CONFIG_FILE, "");

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
        assert!(paths.has_project_config());
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
        assert!(paths.project_local.is_none());
        assert!(!paths.has_project_config());
    }

    #[test]
    fn find_project_root_finds_weaver_dir() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("static").join("js");
        fs::create_dir_all(&subdir).unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&subdir), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_falls_back_to_app_file() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("patterns");
        fs::create_dir_all(&subdir).unwrap();
        fs::write(temp.path().join("app.py"), "").unwrap();

        assert_eq!(find_project_root(&subdir), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn merged_config_without_files_is_default() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.app_name, "Dune Weaver");
        assert_eq!(config.profile, ModuleProfile::Full);
    }

    #[test]
    fn local_file_overrides_project_file() {
        let temp = TempDir::new().unwrap();
        write_project_file(
            &temp,
            CONFIG_FILE,
            "profile: core\nremediation:\n  policy: install\n  no_cache: false\n",
        );
        write_project_file(
            &temp,
            LOCAL_CONFIG_FILE,
            "remediation:\n  policy: report\nlaunch:\n  strategy: spawn\n",
        );

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.profile, ModuleProfile::Core);
        assert_eq!(config.remediation.policy, RemediationPolicy::Report);
        assert!(!config.remediation.no_cache);
        assert_eq!(config.launch.strategy, LaunchStrategy::Spawn);
    }

    #[test]
    fn empty_project_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        write_project_file(&temp, CONFIG_FILE, "");

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.launch.entrypoint, "entrypoint");
    }

    #[test]
    fn invalid_yaml_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        write_project_file(&temp, CONFIG_FILE, "profile: [unclosed");

        let result = load_merged_config(temp.path());
        assert!(matches!(result, Err(BootError::ConfigParseError { .. })));
    }

    #[test]
    fn override_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");

        let result = load_config(temp.path(), Some(&missing));
        assert!(matches!(result, Err(BootError::ConfigNotFound { .. })));
    }

    #[test]
    fn override_path_skips_merging() {
        let temp = TempDir::new().unwrap();
        write_project_file(&temp, CONFIG_FILE, "app_name: Project");
        let other = temp.path().join("other.yml");
        fs::write(&other, "python: /opt/venv/bin/python\n").unwrap();

        let config = load_config(temp.path(), Some(&other)).unwrap();
        assert_eq!(config.python, "/opt/venv/bin/python");
        assert_eq!(config.app_name, "Dune Weaver");
    }

    #[test]
    fn parse_config_reports_source_path() {
        let err = parse_config("launch: 3", Path::new("/etc/boot.yml")).unwrap_err();
        assert!(err.to_string().contains("/etc/boot.yml"));
    }
}
