//! Run command - execute the full regression suite

use crate::regression::{Orchestrator, Reporter};
use anyhow::{bail, Context, Result};
use simreg_config::{ModuleList, ProjectConfig};
use std::path::PathBuf;

/// Arguments for the run command
pub struct RunArgs {
    /// Explicit config file path (defaults to <dir>/simreg.toml)
    pub config: Option<PathBuf>,
    /// Directory relative paths resolve against
    pub dir: PathBuf,
    /// Override the module list path
    pub module_list: Option<PathBuf>,
    /// Emit a machine-readable summary instead of the console report
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Arguments forwarded verbatim to every module runner
    pub forwarded: Vec<String>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            config: None,
            dir: PathBuf::from("."),
            module_list: None,
            json: false,
            no_color: false,
            forwarded: Vec::new(),
        }
    }
}

/// Run the regression suite.
///
/// The process exit status equals the aggregate failing-test count, the
/// same contract the orchestrator consumes from each runner, so simreg
/// itself composes as a module runner for a higher-level aggregator.
pub fn run(args: RunArgs) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(&args.config, &args.dir)?;

    let list_path = args
        .module_list
        .clone()
        .unwrap_or_else(|| config.registry.module_list.clone());
    let list_path = args.dir.join(list_path);
    let module_list = ModuleList::from_path(&list_path)
        .with_context(|| format!("failed to read module list {}", list_path.display()))?;

    let reporter = Reporter::new().with_silent(args.json);
    let orchestrator = Orchestrator::new(&config, args.dir.clone(), reporter);

    // Fatal: an unsupported environment aborts before any module executes
    orchestrator
        .preflight()
        .context("environment preflight failed")?;

    // The forwarded arguments travel as one token, preserving the caller's
    // original grouping.
    let forwarded = args.forwarded.join(" ");
    let summary = orchestrator.run(&module_list, &forwarded);

    if args.json {
        let launch_failures: Vec<_> = summary
            .launch_failures
            .iter()
            .map(|f| {
                serde_json::json!({
                    "module": f.module,
                    "reason": f.reason,
                })
            })
            .collect();

        println!(
            "{}",
            serde_json::json!({
                "modules_run": summary.modules_run,
                "failing_tests": summary.failing_tests,
                "launch_failures": launch_failures,
                "succeeded": summary.succeeded(),
            })
        );
    }

    if summary.failing_tests > 0 {
        std::process::exit(summary.exit_code());
    }

    if !summary.launch_failures.is_empty() {
        bail!(
            "{} module(s) could not be run",
            summary.launch_failures.len()
        );
    }

    Ok(())
}

pub(crate) fn load_config(explicit: &Option<PathBuf>, dir: &std::path::Path) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => ProjectConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display())),
        None => ProjectConfig::load_or_default(dir).context("failed to load simreg.toml"),
    }
}
