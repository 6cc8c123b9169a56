//! CLI configuration via environment variables
//!
//! simreg uses environment variables for optional configuration.
//! This keeps the CLI simple while allowing customization in CI setups.

use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default to JSON summary output (SIMREG_OUTPUT=json)
    pub default_json: bool,
    /// Disable colored output (SIMREG_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Override the module list path (SIMREG_MODULE_LIST=/path/to/list)
    pub module_list: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("SIMREG_OUTPUT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            no_color: env::var("SIMREG_NO_COLOR").is_ok() || env::var("NO_COLOR").is_ok(),
            module_list: env::var("SIMREG_MODULE_LIST").ok().map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
