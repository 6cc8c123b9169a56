//! Modules command - print the parsed module list

use crate::commands::run::load_config;
use anyhow::{Context, Result};
use colored::Colorize;
use simreg_config::ModuleList;
use std::path::PathBuf;

/// Arguments for the modules command
pub struct ModulesArgs {
    /// Explicit config file path (defaults to <dir>/simreg.toml)
    pub config: Option<PathBuf>,
    /// Directory relative paths resolve against
    pub dir: PathBuf,
    /// Override the module list path
    pub module_list: Option<PathBuf>,
    /// Emit the list as a JSON array
    pub json: bool,
}

/// Print the modules in run order, exactly as the orchestrator would see
/// them after comment filtering and case folding
pub fn run(args: ModulesArgs) -> Result<()> {
    let config = load_config(&args.config, &args.dir)?;

    let list_path = args
        .module_list
        .clone()
        .unwrap_or_else(|| config.registry.module_list.clone());
    let list_path = args.dir.join(list_path);
    let module_list = ModuleList::from_path(&list_path)
        .with_context(|| format!("failed to read module list {}", list_path.display()))?;

    if args.json {
        let names: Vec<_> = module_list.iter().map(|m| m.name()).collect();
        println!("{}", serde_json::json!(names));
        return Ok(());
    }

    if module_list.is_empty() {
        println!("{}", "No modules configured.".yellow());
        return Ok(());
    }

    for (index, module) in module_list.iter().enumerate() {
        println!("{:3}  {}", index + 1, module.name());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_modules_with_list() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("module_list.txt"), "Mod_A\n# skip\nmod_b\n").unwrap();

        let args = ModulesArgs {
            config: None,
            dir: dir.path().to_path_buf(),
            module_list: None,
            json: false,
        };

        assert!(run(args).is_ok());
    }

    #[test]
    fn test_modules_missing_list_is_an_error() {
        let dir = tempdir().unwrap();

        let args = ModulesArgs {
            config: None,
            dir: dir.path().to_path_buf(),
            module_list: None,
            json: false,
        };

        assert!(run(args).is_err());
    }
}
