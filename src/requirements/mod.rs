//! Dependency detection and remediation.
//!
//! This module provides tools for checking whether the Python modules the
//! application needs are importable, and for installing missing ones.
//!
//! # Modules
//!
//! - [`probe`] - Module probes (one child interpreter per module)
//! - [`status`] - Module status and report types
//! - [`checker`] - Ordered, cached dependency checking
//! - [`installer`] - Package installation and the remediation flow
//! - [`diagnostics`] - Interpreter report and smoke checks

pub mod checker;
pub mod diagnostics;
pub mod installer;
pub mod probe;
pub mod status;

pub use checker::{report_missing, report_result, DependencyChecker};
pub use diagnostics::{run_smoke_checks, InterpreterInfo, SmokeResult};
pub use installer::{
    remediate, InstallOutcome, PackageInstaller, PipInstaller, RemediationResult,
};
pub use probe::{ModuleProbe, PythonProbe};
pub use status::{CheckReport, ModuleResult, ModuleStatus};

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory probe and installer sharing one "site-packages" set.

    use super::installer::{InstallOutcome, PackageInstaller};
    use super::probe::ModuleProbe;
    use super::status::ModuleStatus;
    use crate::error::{BootError, Result};
    use crate::ui::UserInterface;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;

    pub struct FakeProbe {
        installed: Rc<RefCell<HashSet<String>>>,
        broken: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
        unavailable: bool,
    }

    impl FakeProbe {
        pub fn with_installed(modules: &[&str]) -> Self {
            Self {
                installed: Rc::new(RefCell::new(
                    modules.iter().map(|m| m.to_string()).collect(),
                )),
                broken: HashMap::new(),
                calls: RefCell::new(Vec::new()),
                unavailable: false,
            }
        }

        pub fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::with_installed(&[])
            }
        }

        pub fn with_broken(mut self, module: &str, message: &str) -> Self {
            self.broken.insert(module.to_string(), message.to_string());
            self
        }

        pub fn install(&self, module: &str) {
            self.installed.borrow_mut().insert(module.to_string());
        }

        pub fn site(&self) -> Rc<RefCell<HashSet<String>>> {
            Rc::clone(&self.installed)
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl ModuleProbe for FakeProbe {
        fn probe(&self, module: &str) -> Result<ModuleStatus> {
            if self.unavailable {
                return Err(BootError::InterpreterNotFound {
                    python: "python3".to_string(),
                    message: "No such file or directory".to_string(),
                });
            }
            self.calls.borrow_mut().push(module.to_string());
            if let Some(message) = self.broken.get(module) {
                return Ok(ModuleStatus::Broken {
                    message: message.clone(),
                });
            }
            if self.installed.borrow().contains(module) {
                Ok(ModuleStatus::Available)
            } else {
                Ok(ModuleStatus::Missing {
                    message: format!("No module named '{}'", module),
                })
            }
        }
    }

    /// Installer that marks packages as importable modules of the same
    /// name, except those listed as `stubborn`.
    pub struct FakeInstaller {
        site: Rc<RefCell<HashSet<String>>>,
        exit_code: i32,
        stubborn: HashSet<String>,
        requests: RefCell<Vec<Vec<String>>>,
    }

    impl FakeInstaller {
        pub fn new(probe: &FakeProbe, exit_code: i32) -> Self {
            Self {
                site: probe.site(),
                exit_code,
                stubborn: HashSet::new(),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn with_stubborn(mut self, package: &str) -> Self {
            self.stubborn.insert(package.to_string());
            self
        }

        pub fn requests(&self) -> Vec<Vec<String>> {
            self.requests.borrow().clone()
        }
    }

    impl PackageInstaller for FakeInstaller {
        fn install(
            &self,
            packages: &[String],
            _ui: &mut dyn UserInterface,
        ) -> Result<InstallOutcome> {
            self.requests.borrow_mut().push(packages.to_vec());
            if self.exit_code == 0 {
                for package in packages {
                    if !self.stubborn.contains(package) {
                        self.site.borrow_mut().insert(package.clone());
                    }
                }
            }
            Ok(InstallOutcome {
                exit_code: Some(self.exit_code),
                success: self.exit_code == 0,
            })
        }

        fn command_line(&self, packages: &[String]) -> String {
            format!("fake-install {}", packages.join(" "))
        }
    }
}
