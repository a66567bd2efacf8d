//! Module status types for dependency checks.
//!
//! Each probe produces a `ModuleStatus` describing whether a module can
//! be imported by the interpreter; a [`CheckReport`] collects one
//! [`ModuleResult`] per requested module, in request order.

use crate::config::ModuleSpec;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// The result of probing a single module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatus {
    /// The module imported cleanly.
    Available,

    /// The import raised `ImportError` (or a subclass such as
    /// `ModuleNotFoundError`). Installing the package may fix this.
    Missing {
        /// The ImportError message, e.g. "No module named 'tqdm'"
        message: String,
    },

    /// The import raised something other than `ImportError`. The package
    /// is present but broken; reinstalling may or may not help.
    Broken {
        /// Last line of the interpreter's error output
        message: String,
    },
}

impl ModuleStatus {
    /// Whether the module is importable.
    pub fn is_available(&self) -> bool {
        matches!(self, ModuleStatus::Available)
    }

    /// The failure message, if the module is not importable.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ModuleStatus::Available => None,
            ModuleStatus::Missing { message } | ModuleStatus::Broken { message } => {
                Some(message)
            }
        }
    }

    /// Short machine-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ModuleStatus::Available => "available",
            ModuleStatus::Missing { .. } => "missing",
            ModuleStatus::Broken { .. } => "broken",
        }
    }
}

/// The outcome of checking one required module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleResult {
    /// The module that was checked
    pub spec: ModuleSpec,
    /// Its status
    pub status: ModuleStatus,
}

impl ModuleResult {
    /// Import name of the checked module.
    pub fn name(&self) -> &str {
        &self.spec.module
    }

    /// Whether the module is importable.
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// The failure message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }
}

impl Serialize for ModuleResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ModuleResult", 5)?;
        s.serialize_field("module", &self.spec.module)?;
        s.serialize_field("package", self.spec.package_name())?;
        s.serialize_field("status", self.status.label())?;
        s.serialize_field("available", &self.is_available())?;
        s.serialize_field("error", &self.error_message())?;
        s.end()
    }
}

/// Ordered results of a dependency check.
///
/// Holds exactly one entry per requested module, in request order,
/// including repeated names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    results: Vec<ModuleResult>,
}

impl CheckReport {
    /// Build a report from ordered results.
    pub fn new(results: Vec<ModuleResult>) -> Self {
        Self { results }
    }

    /// All results in request order.
    pub fn results(&self) -> &[ModuleResult] {
        &self.results
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no modules were checked.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether every module is importable (vacuously true when empty).
    pub fn all_available(&self) -> bool {
        self.results.iter().all(ModuleResult::is_available)
    }

    /// Results for modules that could not be imported.
    pub fn missing(&self) -> Vec<&ModuleResult> {
        self.results.iter().filter(|r| !r.is_available()).collect()
    }

    /// Missing module specs, deduplicated in first-seen order.
    pub fn missing_specs(&self) -> Vec<ModuleSpec> {
        let mut specs: Vec<ModuleSpec> = Vec::new();
        for result in self.missing() {
            if !specs.iter().any(|s| s.module == result.spec.module) {
                specs.push(result.spec.clone());
            }
        }
        specs
    }

    /// Missing module names, deduplicated in first-seen order.
    pub fn missing_names(&self) -> Vec<String> {
        self.missing_specs().into_iter().map(|s| s.module).collect()
    }

    /// Installer package names for the missing modules, deduplicated.
    pub fn missing_packages(&self) -> Vec<String> {
        let mut packages: Vec<String> = Vec::new();
        for spec in self.missing_specs() {
            let package = spec.package_name().to_string();
            if !packages.contains(&package) {
                packages.push(package);
            }
        }
        packages
    }
}

impl Serialize for CheckReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CheckReport", 3)?;
        s.serialize_field("all_available", &self.all_available())?;
        s.serialize_field("missing", &self.missing_names())?;
        s.serialize_field("modules", &self.results)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(module: &str) -> ModuleStatus {
        ModuleStatus::Missing {
            message: format!("No module named '{}'", module),
        }
    }

    fn result(spec: ModuleSpec, status: ModuleStatus) -> ModuleResult {
        ModuleResult { spec, status }
    }

    #[test]
    fn available_has_no_message() {
        let status = ModuleStatus::Available;
        assert!(status.is_available());
        assert_eq!(status.error_message(), None);
        assert_eq!(status.label(), "available");
    }

    #[test]
    fn missing_and_broken_carry_messages() {
        let status = missing("tqdm");
        assert!(!status.is_available());
        assert_eq!(status.error_message(), Some("No module named 'tqdm'"));

        let status = ModuleStatus::Broken {
            message: "RuntimeError: no serial ports".to_string(),
        };
        assert!(!status.is_available());
        assert_eq!(status.label(), "broken");
        assert!(status.error_message().unwrap().contains("RuntimeError"));
    }

    #[test]
    fn empty_report_is_all_available() {
        let report = CheckReport::default();
        assert!(report.is_empty());
        assert!(report.all_available());
        assert!(report.missing_packages().is_empty());
    }

    #[test]
    fn missing_preserves_order_and_deduplicates() {
        let report = CheckReport::new(vec![
            result(ModuleSpec::new("ghost"), missing("ghost")),
            result(ModuleSpec::new("fastapi"), ModuleStatus::Available),
            result(ModuleSpec::with_package("serial", "pyserial"), missing("serial")),
            result(ModuleSpec::new("ghost"), missing("ghost")),
        ]);

        assert_eq!(report.len(), 4);
        assert!(!report.all_available());
        assert_eq!(report.missing().len(), 3);
        assert_eq!(report.missing_names(), vec!["ghost", "serial"]);
        assert_eq!(report.missing_packages(), vec!["ghost", "pyserial"]);
    }

    #[test]
    fn modules_sharing_a_package_install_it_once() {
        let report = CheckReport::new(vec![
            result(ModuleSpec::with_package("paho.mqtt", "paho-mqtt"), missing("paho")),
            result(
                ModuleSpec::with_package("paho.mqtt.client", "paho-mqtt"),
                missing("paho"),
            ),
        ]);
        assert_eq!(report.missing_names().len(), 2);
        assert_eq!(report.missing_packages(), vec!["paho-mqtt"]);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = CheckReport::new(vec![
            result(ModuleSpec::new("fastapi"), ModuleStatus::Available),
            result(ModuleSpec::with_package("serial", "pyserial"), missing("serial")),
        ]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["all_available"], false);
        assert_eq!(json["missing"][0], "serial");
        assert_eq!(json["modules"][0]["module"], "fastapi");
        assert_eq!(json["modules"][0]["error"], serde_json::Value::Null);
        assert_eq!(json["modules"][1]["package"], "pyserial");
        assert_eq!(json["modules"][1]["status"], "missing");
    }
}
