//! simreg Configuration System
//!
//! Provides configuration management for regression runs including:
//! - Project configuration (simreg.toml)
//! - The module registry (module_list.txt)
//! - Workspace layout and runner conventions
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Built-in defaults (the stock UVVM-style directory conventions)
//! 2. Project config (./simreg.toml)
//! 3. Environment variables (SIMREG_*)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use simreg_config::{ModuleList, ProjectConfig};
//! use std::path::Path;
//!
//! let config = ProjectConfig::load_or_default(Path::new(".")).unwrap();
//! let modules = ModuleList::from_path(&config.registry.module_list).unwrap();
//! ```

pub mod modules;
pub mod project;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Module list not found: {0}")]
    ModuleListNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use modules::{Module, ModuleList};
pub use project::{
    CheckConfig, CheckStep, ProjectConfig, RegistryConfig, RunnerConfig, WorkspaceConfig,
};
