//! Regression reporter - console presentation of a run
//!
//! Prints the per-module banners with the running failing tally, the
//! kept/removed lines from workspace preparation, and the final summary.
//! The running tally is printed before each module starts so a long
//! sequential run stays observable, not just its final line.

use crate::regression::orchestrator::RegressionSummary;
use crate::regression::runner::RunOutcome;
use crate::regression::workspace::PrepareReport;
use colored::Colorize;

const BANNER_WIDTH: usize = 50;

/// Console reporter for regression runs
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    silent: bool,
}

impl Reporter {
    /// Create a reporter that prints to the console
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress all console output (used for machine-readable modes)
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Banner printed before each module, with the 1-based position and
    /// the failing tally accumulated so far
    pub fn module_banner(&self, position: usize, name: &str, failing_so_far: u32) {
        if self.silent {
            return;
        }
        println!();
        println!("{}", "-".repeat(BANNER_WIDTH));
        println!("Running module {}: {}.", position, name.bold());
        println!("Num failing tests in regression run: {}", failing_so_far);
    }

    /// Kept/removed lines from workspace preparation
    pub fn prepare_report(&self, report: &PrepareReport) {
        if self.silent {
            return;
        }
        if report.created {
            println!("Created workspace.");
        }
        for path in report.kept() {
            println!("Keeping: {}", path.display());
        }
        for (path, reason) in report.warnings() {
            eprintln!(
                "{} unable to remove {} [{}]",
                "warning:".yellow().bold(),
                path.display(),
                reason
            );
        }
        println!(
            "Removed: {} files, {} dirs.",
            report.files_removed(),
            report.dirs_removed()
        );
    }

    /// The arguments forwarded to the runner, echoed before each launch
    pub fn forwarded_args(&self, forwarded: &str) {
        if self.silent || forwarded.is_empty() {
            return;
        }
        println!("{}", forwarded);
    }

    /// Per-module outcome line; silent on success like the runners are
    pub fn outcome(&self, outcome: &RunOutcome) {
        if self.silent {
            return;
        }
        if let RunOutcome::Failed { failing_tests } = outcome {
            println!(
                "Number of failing tests: {}",
                failing_tests.to_string().red().bold()
            );
        }
    }

    /// A module that produced no count at all
    pub fn launch_failure(&self, name: &str, reason: &str) {
        if self.silent {
            return;
        }
        eprintln!(
            "{} module {} could not be run: {}",
            "error:".red().bold(),
            name,
            reason
        );
    }

    /// Final summary, printed once after the whole list has been processed
    pub fn final_summary(&self, summary: &RegressionSummary) {
        if self.silent {
            return;
        }
        println!();
        println!("{}", "-".repeat(BANNER_WIDTH));

        if summary.failing_tests > 0 {
            println!(
                "Regression test {} with a total of {} failing tests.",
                "FAILED".red().bold(),
                summary.failing_tests
            );
        } else if summary.launch_failures.is_empty() {
            println!(
                "Regression test {} with a total of 0 failing tests.",
                "SUCCEEDED".green().bold()
            );
        } else {
            println!(
                "Regression test {}: no failing tests reported.",
                "INCOMPLETE".yellow().bold()
            );
        }

        if !summary.launch_failures.is_empty() {
            println!(
                "{} module(s) could not be run:",
                summary.launch_failures.len()
            );
            for failure in &summary.launch_failures {
                println!("  {}: {}", failure.module, failure.reason);
            }
        }
    }
}
