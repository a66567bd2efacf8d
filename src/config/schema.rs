//! Configuration schema definitions for weaver-boot.
//!
//! This module contains all the struct definitions that map to
//! the `.weaver/boot.yml` file format.

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration structure for boot.yml
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BootConfig {
    /// Application name (for display purposes)
    pub app_name: String,

    /// Interpreter used for probing, installing and launching
    pub python: String,

    /// Built-in module set the `modules` list is appended to
    pub profile: ModuleProfile,

    /// Additional required modules, in check order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ModuleSpec>,

    /// What to do about missing modules
    pub remediation: RemediationConfig,

    /// How to hand off to the application
    pub launch: LaunchConfig,

    /// Interpreter snippets that must run cleanly
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub smoke: Vec<SmokeCheck>,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            python: crate::shell::default_python().to_string(),
            profile: ModuleProfile::default(),
            modules: Vec::new(),
            remediation: RemediationConfig::default(),
            launch: LaunchConfig::default(),
            smoke: Vec::new(),
        }
    }
}

fn default_app_name() -> String {
    "Dune Weaver".to_string()
}

impl BootConfig {
    /// The full ordered module list: profile modules, then configured ones.
    ///
    /// A configured module the profile already supplies is skipped. The
    /// configured list itself is kept as written, repeats included, so
    /// every listed name gets its own report entry.
    pub fn required_modules(&self) -> Vec<ModuleSpec> {
        let profile = self.profile.modules();
        let extra: Vec<ModuleSpec> = self
            .modules
            .iter()
            .filter(|spec| !profile.iter().any(|m| m.module == spec.module))
            .cloned()
            .collect();
        profile.into_iter().chain(extra).collect()
    }
}

/// A required module: import name plus the package that provides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ModuleEntry", into = "ModuleEntry")]
pub struct ModuleSpec {
    /// Name passed to `importlib.import_module`
    pub module: String,
    /// Name passed to the installer (defaults to the module name)
    pub package: Option<String>,
}

impl ModuleSpec {
    /// A module installed under its own name.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            package: None,
        }
    }

    /// A module provided by a differently named package.
    pub fn with_package(module: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            package: Some(package.into()),
        }
    }

    /// The name to hand to the installer.
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or(&self.module)
    }
}

impl fmt::Display for ModuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.module)
    }
}

impl JsonSchema for ModuleSpec {
    fn schema_name() -> Cow<'static, str> {
        "ModuleSpec".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        ModuleEntry::json_schema(generator)
    }
}

/// YAML form of a module: a bare name or a `{ module, package }` map.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
enum ModuleEntry {
    Name(String),
    Detailed {
        module: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<String>,
    },
}

impl From<ModuleEntry> for ModuleSpec {
    fn from(entry: ModuleEntry) -> Self {
        match entry {
            ModuleEntry::Name(module) => ModuleSpec::new(module),
            ModuleEntry::Detailed { module, package } => ModuleSpec { module, package },
        }
    }
}

impl From<ModuleSpec> for ModuleEntry {
    fn from(spec: ModuleSpec) -> Self {
        match spec.package {
            None => ModuleEntry::Name(spec.module),
            Some(package) => ModuleEntry::Detailed {
                module: spec.module,
                package: Some(package),
            },
        }
    }
}

/// Built-in module sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModuleProfile {
    /// Web stack only
    Core,
    /// Web stack plus hardware and utility libraries
    #[default]
    Full,
    /// No built-in modules
    None,
}

impl ModuleProfile {
    /// The ordered modules for this profile.
    pub fn modules(self) -> Vec<ModuleSpec> {
        let core = || {
            vec![
                ModuleSpec::new("fastapi"),
                ModuleSpec::new("uvicorn"),
                ModuleSpec::new("pydantic"),
                ModuleSpec::new("jinja2"),
                ModuleSpec::new("aiofiles"),
                ModuleSpec::with_package("python_multipart", "python-multipart"),
                ModuleSpec::new("websockets"),
            ]
        };

        match self {
            Self::Core => core(),
            Self::Full => {
                let mut modules = core();
                modules.extend([
                    ModuleSpec::with_package("serial", "pyserial"),
                    ModuleSpec::with_package("paho.mqtt", "paho-mqtt"),
                    ModuleSpec::with_package("websocket", "websocket-client"),
                    ModuleSpec::new("tqdm"),
                    ModuleSpec::with_package("dotenv", "python-dotenv"),
                ]);
                modules
            }
            Self::None => Vec::new(),
        }
    }
}

impl FromStr for ModuleProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "core" => Ok(Self::Core),
            "full" => Ok(Self::Full),
            "none" => Ok(Self::None),
            _ => Err(format!("unknown profile: {}", s)),
        }
    }
}

/// Policy for modules that fail to import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RemediationPolicy {
    /// Report and fail; never install
    Report,
    /// Install into the interpreter's environment
    Install,
    /// Install into the user site-packages (`--user`)
    #[default]
    InstallUser,
}

impl RemediationPolicy {
    /// Whether this policy runs the installer.
    pub fn installs(self) -> bool {
        !matches!(self, Self::Report)
    }

    /// Whether installs are user-scoped.
    pub fn user_scoped(self) -> bool {
        matches!(self, Self::InstallUser)
    }
}

impl FromStr for RemediationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "install" => Ok(Self::Install),
            "install-user" | "install_user" => Ok(Self::InstallUser),
            _ => Err(format!("unknown remediation policy: {}", s)),
        }
    }
}

/// Installer settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RemediationConfig {
    /// Remediation policy
    pub policy: RemediationPolicy,

    /// Pass `--no-cache-dir` to pip
    pub no_cache: bool,

    /// Extra arguments placed before the package names
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            policy: RemediationPolicy::default(),
            no_cache: true,
            extra_args: Vec::new(),
        }
    }
}

/// How control is handed to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LaunchStrategy {
    /// Execute the file's source as `__main__` in the interpreter
    #[default]
    Run,
    /// Import the file and call its entry-point attribute
    Entrypoint,
    /// Run the file as a standalone script
    Spawn,
}

impl FromStr for LaunchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "run" => Ok(Self::Run),
            "entrypoint" => Ok(Self::Entrypoint),
            "spawn" => Ok(Self::Spawn),
            _ => Err(format!("unknown launch strategy: {}", s)),
        }
    }
}

impl fmt::Display for LaunchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Run => "run",
            Self::Entrypoint => "entrypoint",
            Self::Spawn => "spawn",
        };
        f.write_str(name)
    }
}

/// Application hand-off settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LaunchConfig {
    /// Application file, relative to the working directory
    pub app: PathBuf,

    /// Hand-off strategy
    pub strategy: LaunchStrategy,

    /// Attribute called by the `entrypoint` strategy
    pub entrypoint: String,

    /// Working directory (relative to the project root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Replace the launcher process (unix, `run` and `spawn` only)
    pub exec: bool,

    /// Environment variables for the application
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            app: PathBuf::from("app.py"),
            strategy: LaunchStrategy::default(),
            entrypoint: "entrypoint".to_string(),
            working_dir: None,
            exec: false,
            env: BTreeMap::new(),
        }
    }
}

/// A snippet that must run without error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SmokeCheck {
    /// Display name
    pub name: String,
    /// Interpreter source passed with `-c`
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_container_layout() {
        let config = BootConfig::default();
        assert_eq!(config.app_name, "Dune Weaver");
        assert_eq!(config.profile, ModuleProfile::Full);
        assert_eq!(config.remediation.policy, RemediationPolicy::InstallUser);
        assert!(config.remediation.no_cache);
        assert_eq!(config.launch.app, PathBuf::from("app.py"));
        assert_eq!(config.launch.entrypoint, "entrypoint");
        assert_eq!(config.launch.strategy, LaunchStrategy::Run);
    }

    #[test]
    fn module_accepts_bare_name_and_map() {
        let yaml = r#"
modules:
  - tqdm
  - module: serial
    package: pyserial
  - module: jinja2
"#;
        let config: BootConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.modules,
            vec![
                ModuleSpec::new("tqdm"),
                ModuleSpec::with_package("serial", "pyserial"),
                ModuleSpec::new("jinja2"),
            ]
        );
    }

    #[test]
    fn module_serializes_back_to_compact_form() {
        let config = BootConfig {
            modules: vec![
                ModuleSpec::new("tqdm"),
                ModuleSpec::with_package("serial", "pyserial"),
            ],
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("- tqdm"));
        assert!(yaml.contains("module: serial"));
        assert!(yaml.contains("package: pyserial"));
    }

    #[test]
    fn package_name_falls_back_to_module() {
        assert_eq!(ModuleSpec::new("tqdm").package_name(), "tqdm");
        assert_eq!(
            ModuleSpec::with_package("serial", "pyserial").package_name(),
            "pyserial"
        );
    }

    #[test]
    fn full_profile_extends_core() {
        let core = ModuleProfile::Core.modules();
        let full = ModuleProfile::Full.modules();
        assert_eq!(core.len(), 7);
        assert_eq!(full.len(), 12);
        assert_eq!(&full[..7], &core[..]);
        assert!(ModuleProfile::None.modules().is_empty());
    }

    #[test]
    fn required_modules_appends_without_duplicates() {
        let config = BootConfig {
            profile: ModuleProfile::Core,
            modules: vec![ModuleSpec::new("fastapi"), ModuleSpec::new("tqdm")],
            ..Default::default()
        };
        let modules = config.required_modules();
        assert_eq!(modules.len(), 8);
        assert_eq!(modules.last().unwrap().module, "tqdm");
        assert_eq!(modules.iter().filter(|m| m.module == "fastapi").count(), 1);
    }

    #[test]
    fn required_modules_keeps_repeats_in_configured_list() {
        let config = BootConfig {
            profile: ModuleProfile::None,
            modules: vec![
                ModuleSpec::new("a"),
                ModuleSpec::new("ghost"),
                ModuleSpec::new("a"),
            ],
            ..Default::default()
        };
        let names: Vec<String> = config
            .required_modules()
            .into_iter()
            .map(|m| m.module)
            .collect();
        assert_eq!(names, ["a", "ghost", "a"]);
    }

    #[test]
    fn policy_parses_from_yaml() {
        let config: BootConfig =
            serde_yaml::from_str("remediation:\n  policy: report\n").unwrap();
        assert_eq!(config.remediation.policy, RemediationPolicy::Report);
        assert!(!config.remediation.policy.installs());
        assert!(config.remediation.no_cache);
    }

    #[test]
    fn policy_from_str_accepts_both_spellings() {
        assert_eq!(
            "install-user".parse::<RemediationPolicy>(),
            Ok(RemediationPolicy::InstallUser)
        );
        assert_eq!(
            "install_user".parse::<RemediationPolicy>(),
            Ok(RemediationPolicy::InstallUser)
        );
        assert!("later".parse::<RemediationPolicy>().is_err());
    }

    #[test]
    fn strategy_round_trips_through_display() {
        for strategy in [
            LaunchStrategy::Run,
            LaunchStrategy::Entrypoint,
            LaunchStrategy::Spawn,
        ] {
            assert_eq!(strategy.to_string().parse::<LaunchStrategy>(), Ok(strategy));
        }
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let result: Result<BootConfig, _> = serde_yaml::from_str("profile: huge\n");
        assert!(result.is_err());
    }
}
