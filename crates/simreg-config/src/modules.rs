//! Module registry (module_list.txt)
//!
//! The registry is a line-oriented list of verification module names, one
//! per line. Lines whose first non-space character is `#` are comments.
//! Names are case-folded to lower-case; order is preserved exactly as read
//! and governs run order.

use crate::{ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};

/// A single verification module named in the registry.
///
/// A module is an external directory tree with its own runner script and
/// simulation workspace; the registry only knows its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
}

impl Module {
    /// Create a module, normalizing the name to lower-case
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
        }
    }

    /// The normalized module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The module's root directory under the configured workspace root
    pub fn root_dir(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.name)
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// An ordered list of modules read from the registry source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleList {
    modules: Vec<Module>,
}

impl ModuleList {
    /// Parse a registry source.
    ///
    /// Comment lines (first non-space character `#`) and blank lines are
    /// skipped; everything else becomes a module, lower-cased, in order.
    /// An empty result is valid: it means there is nothing to run.
    pub fn parse(source: &str) -> Self {
        let modules = source
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter(|line| !line.trim_start().starts_with('#'))
            .map(Module::new)
            .collect();

        Self { modules }
    }

    /// Read and parse the registry file at `path`
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::ModuleListNotFound(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        Ok(Self::parse(&source))
    }

    /// Number of modules in run order
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// True if there are no modules to run
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate the modules in run order
    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }
}

impl<'a> IntoIterator for &'a ModuleList {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
