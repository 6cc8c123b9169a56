//! Check command - run a single module's component check

use crate::check::run_component_check;
use crate::commands::run::load_config;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use simreg_config::Module;
use std::path::PathBuf;

/// Arguments for the check command
pub struct CheckArgs {
    /// The module to check
    pub module: String,
    /// Explicit config file path (defaults to <dir>/simreg.toml)
    pub config: Option<PathBuf>,
    /// Directory relative paths resolve against
    pub dir: PathBuf,
    /// Disable colored output
    pub no_color: bool,
}

/// Run the configured check steps for one module and write its status
/// artifact. Exits non-zero when any step failed.
pub fn run(args: CheckArgs) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(&args.config, &args.dir)?;

    if config.check.steps.is_empty() {
        bail!("no check steps configured; add [[check.steps]] to simreg.toml");
    }

    let module = Module::new(&args.module);
    let module_root = args
        .dir
        .join(&config.workspace.root)
        .join(module.name());
    if !module_root.is_dir() {
        bail!("module directory not found: {}", module_root.display());
    }

    let report = run_component_check(&config.check, &module_root, module.name(), true)
        .with_context(|| format!("component check for {} failed to complete", module.name()))?;

    println!();
    if report.passed() {
        println!(
            "Component check {} for {}",
            "PASSED".green().bold(),
            report.module
        );
    } else {
        let failed = report.steps.iter().filter(|s| !s.passed).count();
        println!(
            "Component check {} for {} ({} of {} steps)",
            "FAILED".red().bold(),
            report.module,
            failed,
            report.steps.len()
        );
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_without_configured_steps() {
        let dir = tempdir().unwrap();

        let args = CheckArgs {
            module: "mod_a".to_string(),
            config: None,
            dir: dir.path().to_path_buf(),
            no_color: true,
        };

        let result = run(args);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_missing_module_directory() {
        let root = tempdir().unwrap();
        let reg_dir = root.path().join("reg");
        fs::create_dir(&reg_dir).unwrap();
        fs::write(
            reg_dir.join("simreg.toml"),
            r#"
[workspace]
root = ".."

[[check.steps]]
name = "Modelsim"
command = ["true"]
"#,
        )
        .unwrap();

        let args = CheckArgs {
            module: "missing_module".to_string(),
            config: None,
            dir: reg_dir,
            no_color: true,
        };

        let result = run(args);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_passing_module() {
        let root = tempdir().unwrap();
        let reg_dir = root.path().join("reg");
        fs::create_dir(&reg_dir).unwrap();
        fs::create_dir(root.path().join("mod_a")).unwrap();
        fs::write(
            reg_dir.join("simreg.toml"),
            r#"
[workspace]
root = ".."

[[check.steps]]
name = "Modelsim"
command = ["true"]
"#,
        )
        .unwrap();

        let args = CheckArgs {
            module: "mod_a".to_string(),
            config: None,
            dir: reg_dir,
            no_color: true,
        };

        run(args).unwrap();
        assert!(root.path().join("mod_a/status.txt").exists());
    }
}
