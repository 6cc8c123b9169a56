//! Project Configuration (simreg.toml)
//!
//! Handles the regression driver's configuration stored in `simreg.toml`
//! in the directory the driver is invoked from. Every section has complete
//! defaults matching the stock UVVM-style directory conventions, so a
//! missing file is not an error.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "simreg.toml";

/// Project configuration from simreg.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct ProjectConfig {
    /// Module registry source
    pub registry: RegistryConfig,

    /// Workspace layout and protected files
    pub workspace: WorkspaceConfig,

    /// Per-module runner invocation
    pub runner: RunnerConfig,

    /// Single-module component check
    pub check: CheckConfig,
}

/// Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RegistryConfig {
    /// Path to the module list, relative to the driver's working directory
    pub module_list: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            module_list: PathBuf::from("module_list.txt"),
        }
    }
}

/// Workspace layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct WorkspaceConfig {
    /// Directory containing the module trees, relative to the driver's
    /// working directory
    pub root: PathBuf,

    /// Simulation directory inside each module tree
    pub sim_dir: PathBuf,

    /// Basenames preserved during workspace preparation, matched
    /// case-insensitively
    pub protected: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("../.."),
            sim_dir: PathBuf::from("sim"),
            protected: vec!["bitvis_irqc.mpf".to_string()],
        }
    }
}

impl WorkspaceConfig {
    /// The simulation workspace for a module: `<root>/<name>/<sim_dir>`
    pub fn sim_dir_for(&self, module_name: &str) -> PathBuf {
        self.root.join(module_name).join(&self.sim_dir)
    }
}

/// Runner invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RunnerConfig {
    /// Interpreter the module runner scripts are written for
    pub program: String,

    /// Runner script path, relative to each module's root directory
    pub script: PathBuf,

    /// Minimum major version required of the interpreter. When absent the
    /// preflight probe is skipped.
    pub require_major: Option<u32>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            script: PathBuf::from("internal_script/run.py"),
            require_major: None,
        }
    }
}

/// Component-check configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct CheckConfig {
    /// Status artifact written at the module root, overwritten at the
    /// start of each check run
    pub status_file: String,

    /// Paths relative to the module root swept before each step and after
    /// the last one
    pub scratch: Vec<PathBuf>,

    /// Ordered check steps
    pub steps: Vec<CheckStep>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            status_file: "status.txt".to_string(),
            scratch: Vec::new(),
            steps: Vec::new(),
        }
    }
}

/// One step of the component check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CheckStep {
    /// Step name as it appears in the status transcript
    pub name: String,

    /// Command and arguments
    pub command: Vec<String>,

    /// Working directory relative to the module root (defaults to the
    /// module root itself)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|error| ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load `simreg.toml` from `dir`, falling back to the built-in
    /// defaults when the file does not exist
    pub fn load_or_default(dir: &Path) -> ConfigResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.runner.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "runner.program".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        for step in &self.check.steps {
            if step.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "check step with an empty name".to_string(),
                ));
            }
            if step.command.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "check step '{}' has an empty command",
                    step.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_stock_conventions() {
        let config = ProjectConfig::default();
        assert_eq!(config.registry.module_list, PathBuf::from("module_list.txt"));
        assert_eq!(config.workspace.root, PathBuf::from("../.."));
        assert_eq!(config.workspace.sim_dir, PathBuf::from("sim"));
        assert_eq!(config.workspace.protected, vec!["bitvis_irqc.mpf"]);
        assert_eq!(config.runner.program, "python3");
        assert_eq!(config.runner.script, PathBuf::from("internal_script/run.py"));
        assert_eq!(config.runner.require_major, None);
        assert_eq!(config.check.status_file, "status.txt");
        assert!(config.check.steps.is_empty());
    }

    #[test]
    fn test_sim_dir_for_module() {
        let workspace = WorkspaceConfig::default();
        assert_eq!(
            workspace.sim_dir_for("bitvis_irqc"),
            PathBuf::from("../../bitvis_irqc/sim")
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config: ProjectConfig = toml::from_str(
            r#"
[registry]
module_list = "modules.txt"

[workspace]
root = ".."
sim_dir = "sim"
protected = ["board.mpf", "wave.do"]

[runner]
program = "python3"
script = "script/run.py"
require_major = 3

[check]
status_file = "status.txt"
scratch = ["sim/vunit_out"]

[[check.steps]]
name = "Modelsim"
command = ["python3", "internal_run.py", "-p8"]
dir = "sim"
"#,
        )
        .unwrap();

        assert_eq!(config.registry.module_list, PathBuf::from("modules.txt"));
        assert_eq!(config.workspace.protected.len(), 2);
        assert_eq!(config.runner.require_major, Some(3));
        assert_eq!(config.check.steps.len(), 1);
        assert_eq!(config.check.steps[0].name, "Modelsim");
        assert_eq!(config.check.steps[0].dir, Some(PathBuf::from("sim")));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ProjectConfig = toml::from_str(
            r#"
[workspace]
protected = ["keep.mpf"]
"#,
        )
        .unwrap();

        assert_eq!(config.workspace.protected, vec!["keep.mpf"]);
        // Untouched sections keep their defaults
        assert_eq!(config.workspace.root, PathBuf::from("../.."));
        assert_eq!(config.runner.program, "python3");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ProjectConfig, _> = toml::from_str(
            r#"
[workspace]
rooot = ".."
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_runner_program() {
        let mut config = ProjectConfig::default();
        config.runner.program = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_step_with_empty_command() {
        let mut config = ProjectConfig::default();
        config.check.steps.push(CheckStep {
            name: "Modelsim".to_string(),
            command: vec![],
            dir: None,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProjectConfig::load(Path::new("/nonexistent/simreg.toml"));
        assert!(matches!(err, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_load_or_default_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[runner]\nprogram = \"sh\"\nscript = \"run.sh\"\n",
        )
        .unwrap();

        let config = ProjectConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.runner.program, "sh");
        assert_eq!(config.runner.script, PathBuf::from("run.sh"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[workspace\nroot = ..").unwrap();

        let err = ProjectConfig::load(&path);
        assert!(matches!(err, Err(ConfigError::TomlParseError { .. })));
    }
}
