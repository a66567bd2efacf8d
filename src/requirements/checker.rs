//! Dependency checker.
//!
//! The `DependencyChecker` probes each required module in order, printing
//! one status line per module and caching results within a run so a
//! module listed twice is only probed once.

use crate::config::ModuleSpec;
use crate::error::Result;
use crate::requirements::probe::ModuleProbe;
use crate::requirements::status::{CheckReport, ModuleResult, ModuleStatus};
use crate::ui::{StatusKind, UserInterface};
use std::collections::HashMap;

/// Checks whether required modules can be imported.
///
/// Caches results per-run; call [`invalidate`](Self::invalidate) after an
/// installation so the next check hits the interpreter again.
pub struct DependencyChecker<'a> {
    probe: &'a dyn ModuleProbe,
    cache: HashMap<String, ModuleStatus>,
}

impl<'a> DependencyChecker<'a> {
    /// Create a new checker backed by `probe`.
    pub fn new(probe: &'a dyn ModuleProbe) -> Self {
        Self {
            probe,
            cache: HashMap::new(),
        }
    }

    /// Check a single module, using cache when available.
    pub fn check_one(&mut self, module: &str) -> Result<ModuleStatus> {
        if let Some(cached) = self.cache.get(module) {
            tracing::debug!(module, "probe cache hit");
            return Ok(cached.clone());
        }

        let status = self.probe.probe(module)?;
        self.cache.insert(module.to_string(), status.clone());
        Ok(status)
    }

    /// Check every module in order without printing anything.
    ///
    /// The report has exactly one entry per input, duplicates included.
    pub fn check(&mut self, modules: &[ModuleSpec]) -> Result<CheckReport> {
        let mut results = Vec::with_capacity(modules.len());
        for spec in modules {
            let status = self.check_one(&spec.module)?;
            results.push(ModuleResult {
                spec: spec.clone(),
                status,
            });
        }
        Ok(CheckReport::new(results))
    }

    /// Check every module in order, printing one status line per module.
    pub fn check_and_report(
        &mut self,
        modules: &[ModuleSpec],
        ui: &mut dyn UserInterface,
    ) -> Result<CheckReport> {
        let mut results = Vec::with_capacity(modules.len());
        for spec in modules {
            let status = self.check_one(&spec.module)?;
            let result = ModuleResult {
                spec: spec.clone(),
                status,
            };
            report_result(&result, ui);
            results.push(result);
        }
        Ok(CheckReport::new(results))
    }

    /// Invalidate a cached result for a specific module.
    pub fn invalidate(&mut self, module: &str) {
        self.cache.remove(module);
    }

    /// Invalidate all cached results.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }
}

/// Print the status line for one result.
pub fn report_result(result: &ModuleResult, ui: &mut dyn UserInterface) {
    match result.error_message() {
        None => ui.status(
            StatusKind::Success,
            &format!("{} is installed", result.name()),
        ),
        Some(message) => ui.status(
            StatusKind::Failed,
            &format!("{} is NOT installed: {}", result.name(), message),
        ),
    }
}

/// Print the `Missing packages:` block for a failed report.
pub fn report_missing(report: &CheckReport, ui: &mut dyn UserInterface) {
    let missing = report.missing_names();
    if missing.is_empty() {
        return;
    }

    ui.message("");
    ui.message("Missing packages:");
    for name in &missing {
        ui.message(&format!("  - {}", name));
    }
}
