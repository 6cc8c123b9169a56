//! Workspace preparation - stage a module's simulation directory
//!
//! Before a module's runner is invoked its workspace must exist and contain
//! only protected files. Anything left over from a previous run is removed,
//! recursively for directories. A locked or in-use artifact must not block
//! the rest of cleanup, so per-entry failures are collected as warnings
//! instead of aborting the sweep.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Basenames preserved during preparation, matched case-insensitively
#[derive(Debug, Clone, Default)]
pub struct ProtectedFiles {
    names: HashSet<String>,
}

impl ProtectedFiles {
    /// Build the allow-list, normalizing every name to lower-case
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Check whether a basename is protected
    pub fn contains(&self, file_name: &OsStr) -> bool {
        self.names
            .contains(&file_name.to_string_lossy().to_lowercase())
    }
}

/// Outcome for one directory entry inspected during preparation
#[derive(Debug, Clone)]
pub enum EntryOutcome {
    /// Entry was removed as a single file
    RemovedFile(PathBuf),
    /// Entry was removed recursively as a directory
    RemovedDir(PathBuf),
    /// Entry matched the protected allow-list and was left in place
    Kept(PathBuf),
    /// Entry could not be removed; the sweep continued past it
    Failed { path: PathBuf, reason: String },
}

/// Report from preparing one workspace
#[derive(Debug, Clone, Default)]
pub struct PrepareReport {
    /// True when the directory did not exist and was created
    pub created: bool,
    /// Per-entry outcomes in directory order
    pub outcomes: Vec<EntryOutcome>,
}

impl PrepareReport {
    /// Number of plain files removed
    pub fn files_removed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::RemovedFile(_)))
            .count()
    }

    /// Number of directories removed
    pub fn dirs_removed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::RemovedDir(_)))
            .count()
    }

    /// Paths that matched the allow-list and were kept
    pub fn kept(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| match o {
            EntryOutcome::Kept(path) => Some(path.as_path()),
            _ => None,
        })
    }

    /// Entries that could not be removed
    pub fn warnings(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            EntryOutcome::Failed { path, reason } => Some((path.as_path(), reason.as_str())),
            _ => None,
        })
    }
}

/// Prepare a module workspace.
///
/// A missing directory is created (intermediate directories included) and
/// reported with zero removals. Otherwise every direct child whose
/// lower-cased basename is not in the allow-list is removed. The operation
/// only fails outright when the directory cannot be created or listed;
/// individual removal failures are recorded in the report.
pub fn prepare(path: &Path, protected: &ProtectedFiles) -> io::Result<PrepareReport> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        return Ok(PrepareReport {
            created: true,
            outcomes: Vec::new(),
        });
    }

    let mut outcomes = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                outcomes.push(EntryOutcome::Failed {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let entry_path = entry.path();

        if protected.contains(&entry.file_name()) {
            outcomes.push(EntryOutcome::Kept(entry_path));
            continue;
        }

        // file_type() does not follow symlinks, so a symlinked directory is
        // removed as the link itself rather than its target.
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        let result = if is_dir {
            fs::remove_dir_all(&entry_path).map(|()| EntryOutcome::RemovedDir(entry_path.clone()))
        } else {
            fs::remove_file(&entry_path).map(|()| EntryOutcome::RemovedFile(entry_path.clone()))
        };

        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => outcomes.push(EntryOutcome::Failed {
                path: entry_path,
                reason: err.to_string(),
            }),
        }
    }

    Ok(PrepareReport {
        created: false,
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn protected(names: &[&str]) -> ProtectedFiles {
        ProtectedFiles::new(names.iter().copied())
    }

    #[test]
    fn test_prepare_creates_missing_workspace() {
        let dir = tempdir().unwrap();
        let workspace = dir.path().join("module/sim");

        let report = prepare(&workspace, &protected(&[])).unwrap();

        assert!(workspace.is_dir());
        assert!(report.created);
        assert_eq!(report.files_removed(), 0);
        assert_eq!(report.dirs_removed(), 0);
    }

    #[test]
    fn test_prepare_removes_unprotected_keeps_protected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("A.txt"), "a").unwrap();
        fs::write(dir.path().join("B.log"), "b").unwrap();
        fs::write(dir.path().join("bitvis_irqc.mpf"), "mpf").unwrap();

        let report = prepare(dir.path(), &protected(&["bitvis_irqc.mpf"])).unwrap();

        assert_eq!(report.files_removed(), 2);
        assert_eq!(report.dirs_removed(), 0);
        assert!(!dir.path().join("A.txt").exists());
        assert!(!dir.path().join("B.log").exists());
        assert!(dir.path().join("bitvis_irqc.mpf").exists());
    }

    #[test]
    fn test_prepare_protected_match_is_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Bitvis_IRQC.MPF"), "mpf").unwrap();

        let report = prepare(dir.path(), &protected(&["bitvis_irqc.mpf"])).unwrap();

        assert_eq!(report.files_removed(), 0);
        assert!(dir.path().join("Bitvis_IRQC.MPF").exists());
        assert_eq!(report.kept().count(), 1);
    }

    #[test]
    fn test_prepare_removes_directories_recursively() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("vunit_out/deep");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("artifact.o"), "x").unwrap();

        let report = prepare(dir.path(), &protected(&[])).unwrap();

        assert_eq!(report.files_removed(), 0);
        assert_eq!(report.dirs_removed(), 1);
        assert!(!dir.path().join("vunit_out").exists());
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("junk.txt"), "x").unwrap();
        fs::write(dir.path().join("keep.mpf"), "x").unwrap();

        let allow = protected(&["keep.mpf"]);
        let first = prepare(dir.path(), &allow).unwrap();
        assert_eq!(first.files_removed(), 1);

        let second = prepare(dir.path(), &allow).unwrap();
        assert_eq!(second.files_removed(), 0);
        assert_eq!(second.dirs_removed(), 0);
        assert!(dir.path().join("keep.mpf").exists());
    }

    #[test]
    fn test_prepare_empty_workspace_reports_nothing() {
        let dir = tempdir().unwrap();

        let report = prepare(dir.path(), &protected(&["keep.mpf"])).unwrap();

        assert!(!report.created);
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn test_protected_files_lowercase_on_both_sides() {
        let allow = ProtectedFiles::new(["Wave.DO"]);
        assert!(allow.contains(OsStr::new("wave.do")));
        assert!(allow.contains(OsStr::new("WAVE.do")));
        assert!(!allow.contains(OsStr::new("other.do")));
    }
}
