//! Regression orchestrator - the sequential run loop
//!
//! Iterates the module list in order, stages each module's workspace,
//! invokes its runner, and folds the reported counts into a run-scoped
//! accumulator. One module's failure never skips later modules: a single
//! flaky module must not hide results for the rest of the suite.

use crate::regression::reporter::Reporter;
use crate::regression::runner::{self, ModuleRunner, RunnerError};
use crate::regression::workspace::{self, ProtectedFiles};
use simreg_config::{ModuleList, ProjectConfig};
use std::path::PathBuf;

/// A module that produced no failing-test count at all.
///
/// Kept separate from the aggregate so a broken environment can never
/// masquerade as some number of failing tests.
#[derive(Debug, Clone)]
pub struct LaunchFailure {
    /// Module name as listed in the registry
    pub module: String,
    /// Human-readable reason
    pub reason: String,
}

/// Aggregate result of one regression run
#[derive(Debug, Clone, Default)]
pub struct RegressionSummary {
    /// Modules whose runner terminated with a count (zero or not)
    pub modules_run: usize,
    /// Sum of all reported failing-test counts
    pub failing_tests: u32,
    /// Modules that could not be staged or launched
    pub launch_failures: Vec<LaunchFailure>,
}

impl RegressionSummary {
    /// True when every module ran and reported zero failing tests
    pub fn succeeded(&self) -> bool {
        self.failing_tests == 0 && self.launch_failures.is_empty()
    }

    /// Process exit status: the aggregate failing-test count.
    ///
    /// Unix truncates exit statuses to 8 bits, so the count is clamped to
    /// 255; an aggregate of 256 must not wrap around to a false success.
    pub fn exit_code(&self) -> i32 {
        self.failing_tests.min(255) as i32
    }
}

/// Drives a full regression run over the configured module list
pub struct Orchestrator<'a> {
    config: &'a ProjectConfig,
    base: PathBuf,
    reporter: Reporter,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator resolving all relative paths against `base`
    pub fn new(config: &'a ProjectConfig, base: impl Into<PathBuf>, reporter: Reporter) -> Self {
        Self {
            config,
            base: base.into(),
            reporter,
        }
    }

    /// Environment preflight, run before any module executes.
    ///
    /// When the configuration requires a minimum interpreter version the
    /// runner program is probed with `--version`. A failed preflight is
    /// fatal: the run aborts with no partial report.
    pub fn preflight(&self) -> Result<(), RunnerError> {
        let Some(required) = self.config.runner.require_major else {
            return Ok(());
        };

        let program = &self.config.runner.program;
        let found = runner::probe_major_version(program)?;
        if found < required {
            return Err(RunnerError::UnsupportedVersion {
                program: program.clone(),
                found,
                required,
            });
        }
        Ok(())
    }

    /// Run every module in list order and return the aggregate.
    ///
    /// The failing-test accumulator is local to this call; the running
    /// tally is reported before each module starts. An empty module list
    /// is a valid, successful run.
    pub fn run(&self, modules: &ModuleList, forwarded: &str) -> RegressionSummary {
        let module_runner = ModuleRunner::new(&self.config.runner);
        let protected = ProtectedFiles::new(&self.config.workspace.protected);
        let workspace_root = self.base.join(&self.config.workspace.root);

        let mut summary = RegressionSummary::default();

        for (index, module) in modules.iter().enumerate() {
            self.reporter
                .module_banner(index + 1, module.name(), summary.failing_tests);

            let module_root = module.root_dir(&workspace_root);
            let sim_dir = module_root.join(&self.config.workspace.sim_dir);

            match workspace::prepare(&sim_dir, &protected) {
                Ok(report) => self.reporter.prepare_report(&report),
                Err(err) => {
                    let reason = format!("workspace preparation failed: {err}");
                    self.reporter.launch_failure(module.name(), &reason);
                    summary.launch_failures.push(LaunchFailure {
                        module: module.name().to_string(),
                        reason,
                    });
                    continue;
                }
            }

            self.reporter.forwarded_args(forwarded);

            match module_runner.invoke(&module_root, &sim_dir, forwarded) {
                Ok(outcome) => {
                    self.reporter.outcome(&outcome);
                    summary.failing_tests += outcome.failing_tests();
                    summary.modules_run += 1;
                }
                Err(err) => {
                    let reason = err.to_string();
                    self.reporter.launch_failure(module.name(), &reason);
                    summary.launch_failures.push(LaunchFailure {
                        module: module.name().to_string(),
                        reason,
                    });
                }
            }
        }

        self.reporter.final_summary(&summary);
        summary
    }
}
