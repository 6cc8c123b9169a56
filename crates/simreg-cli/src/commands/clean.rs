//! Clean command - prepare module workspaces without running anything

use crate::commands::run::load_config;
use crate::regression::{workspace, ProtectedFiles, Reporter};
use anyhow::{Context, Result};
use colored::Colorize;
use simreg_config::Module;
use std::path::PathBuf;

/// Arguments for the clean command
pub struct CleanArgs {
    /// Modules whose workspaces should be prepared
    pub modules: Vec<String>,
    /// Explicit config file path (defaults to <dir>/simreg.toml)
    pub config: Option<PathBuf>,
    /// Directory relative paths resolve against
    pub dir: PathBuf,
    /// Disable colored output
    pub no_color: bool,
}

/// Prepare each named module's workspace: create it if missing, otherwise
/// remove everything but the protected files
pub fn run(args: CleanArgs) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(&args.config, &args.dir)?;
    let protected = ProtectedFiles::new(&config.workspace.protected);
    let reporter = Reporter::new();

    for name in &args.modules {
        let module = Module::new(name);
        let sim_dir = args.dir.join(config.workspace.sim_dir_for(module.name()));

        println!("Preparing workspace for {}", module.name().bold());
        let report = workspace::prepare(&sim_dir, &protected)
            .with_context(|| format!("failed to prepare {}", sim_dir.display()))?;
        reporter.prepare_report(&report);
    }

    Ok(())
}
