//! Runner invocation - launch a module's own test runner
//!
//! Each module brings its own runner script. The orchestrator's contract
//! with it is narrow: the runner is invoked as a subprocess from inside the
//! module's prepared workspace and terminates with an exit status equal to
//! its failing-test count (0 = success). A runner that cannot be launched
//! at all is a distinct condition and is never coerced into a count.

use simreg_config::RunnerConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Conditions under which a runner produced no failing-test count
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("runner script not found: {0}")]
    ScriptMissing(PathBuf),

    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("runner was terminated by a signal before reporting a result")]
    Terminated,

    #[error("could not determine `{program}` version from its --version output")]
    VersionUnknown { program: String },

    #[error("`{program}` major version {found} is below the required {required}")]
    UnsupportedVersion {
        program: String,
        found: u32,
        required: u32,
    },
}

/// Outcome a runner reported through its exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exit status 0: every test passed
    Passed,
    /// Non-zero exit status: the module's failing-test count
    Failed { failing_tests: u32 },
}

impl RunOutcome {
    /// The failing-test count this outcome contributes to the aggregate
    pub fn failing_tests(&self) -> u32 {
        match self {
            Self::Passed => 0,
            Self::Failed { failing_tests } => *failing_tests,
        }
    }

    fn from_exit_code(code: i32) -> Self {
        if code <= 0 {
            Self::Passed
        } else {
            Self::Failed {
                failing_tests: code as u32,
            }
        }
    }
}

/// Invokes module runner scripts with the configured interpreter
#[derive(Debug, Clone)]
pub struct ModuleRunner {
    program: String,
    script: PathBuf,
}

impl ModuleRunner {
    /// Create a runner from the project configuration
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            program: config.program.clone(),
            script: config.script.clone(),
        }
    }

    /// Launch the runner for one module and wait for it to terminate.
    ///
    /// The working directory is the module's prepared workspace and the
    /// forwarded arguments are passed as a single token, preserving the
    /// caller's original grouping. The call blocks with no timeout; a hung
    /// runner hangs the regression run.
    pub fn invoke(
        &self,
        module_root: &Path,
        workspace: &Path,
        forwarded: &str,
    ) -> Result<RunOutcome, RunnerError> {
        let script = module_root.join(&self.script);
        if !script.exists() {
            return Err(RunnerError::ScriptMissing(script));
        }

        // The child runs inside the workspace, so the script path must be
        // anchored before the working directory changes.
        let script = fs::canonicalize(&script).map_err(|source| RunnerError::Launch {
            program: self.program.clone(),
            source,
        })?;

        let status = Command::new(&self.program)
            .arg(&script)
            .arg(forwarded)
            .current_dir(workspace)
            .status()
            .map_err(|source| RunnerError::Launch {
                program: self.program.clone(),
                source,
            })?;

        match status.code() {
            Some(code) => Ok(RunOutcome::from_exit_code(code)),
            None => Err(RunnerError::Terminated),
        }
    }
}

/// Probe `<program> --version` and extract the leading major version
pub fn probe_major_version(program: &str) -> Result<u32, RunnerError> {
    let output = Command::new(program)
        .arg("--version")
        .output()
        .map_err(|source| RunnerError::Launch {
            program: program.to_string(),
            source,
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    parse_major(&text).ok_or_else(|| RunnerError::VersionUnknown {
        program: program.to_string(),
    })
}

/// First run of digits in a version banner, e.g. "Python 3.11.2" -> 3
fn parse_major(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
