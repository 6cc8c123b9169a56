//! Component check engine

use crate::check::status::StatusLog;
use simreg_config::{CheckConfig, CheckStep};
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

const SEPARATOR_WIDTH: usize = 50;

/// Result of one check step
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Step name from the configuration
    pub name: String,
    /// True when the step's command exited with status 0
    pub passed: bool,
    /// Captured error output for a failed step
    pub detail: Option<String>,
}

/// A completed component check
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// The checked module
    pub module: String,
    /// Step results in configuration order
    pub steps: Vec<StepResult>,
}

impl CheckReport {
    /// True when every step passed
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|step| step.passed)
    }
}

/// Run the configured check steps for one module.
///
/// Every step runs even when an earlier one failed; the transcript records
/// a PASS/FAIL line per step plus the captured error output of failures.
/// The status artifact at the module root is overwritten at the start and
/// written out once the last step and the final scratch sweep are done.
pub fn run_component_check(
    config: &CheckConfig,
    module_root: &Path,
    module_name: &str,
    echo: bool,
) -> io::Result<CheckReport> {
    let status_path = module_root.join(&config.status_file);
    if status_path.exists() {
        fs::remove_file(&status_path)?;
    }

    let mut log = StatusLog::new(echo);
    log.line(module_name);
    log.line(&"-".repeat(SEPARATOR_WIDTH));

    let mut steps = Vec::with_capacity(config.steps.len());

    for step in &config.steps {
        sweep_scratch(&config.scratch, module_root, &mut log);

        let result = run_step(step, module_root);
        if result.passed {
            log.line(&format!("{} : PASS", result.name));
        } else {
            log.line(&format!("{} : FAILED", result.name));
            if let Some(detail) = &result.detail {
                log.line(detail);
            }
        }
        steps.push(result);
    }

    sweep_scratch(&config.scratch, module_root, &mut log);

    log.write_to(&status_path)?;

    Ok(CheckReport {
        module: module_name.to_string(),
        steps,
    })
}

fn run_step(step: &CheckStep, module_root: &Path) -> StepResult {
    let Some((program, args)) = step.command.split_first() else {
        return StepResult {
            name: step.name.clone(),
            passed: false,
            detail: Some("empty command".to_string()),
        };
    };

    let work_dir = match &step.dir {
        Some(dir) => module_root.join(dir),
        None => module_root.to_path_buf(),
    };

    let mut command = Command::new(program);
    command.args(args).current_dir(&work_dir);

    match command.output() {
        Ok(output) if output.status.success() => StepResult {
            name: step.name.clone(),
            passed: true,
            detail: None,
        },
        Ok(output) => StepResult {
            name: step.name.clone(),
            passed: false,
            detail: Some(String::from_utf8_lossy(&output.stderr).trim_end().to_string()),
        },
        Err(err) => StepResult {
            name: step.name.clone(),
            passed: false,
            detail: Some(format!("failed to launch: {err}")),
        },
    }
}

/// Remove leftover simulator output; failures are logged, never fatal
fn sweep_scratch(scratch: &[std::path::PathBuf], module_root: &Path, log: &mut StatusLog) {
    for relative in scratch {
        let path = module_root.join(relative);
        if !path.exists() {
            continue;
        }

        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };

        if let Err(err) = result {
            log.line(&format!("Unable to remove {} [{}]", path.display(), err));
        }
    }
}
