//! Discovery of `.cursor` directories and the rule files inside them
//!
//! Scanning is best-effort: a directory that cannot be read is recorded as a
//! [`ScanDiagnostic`] and contributes nothing, while its siblings are still
//! visited.

use std::fmt;
use std::path::{Path, PathBuf};

use super::fs::{DirEntry, FileSystem};
use super::rule::SourceFile;
use crate::config::Layout;

/// A non-fatal problem met while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Entries found by a scan plus anything that was skipped on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome<T> {
    pub entries: Vec<T>,
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl<T> Default for ScanOutcome<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<T> ScanOutcome<T> {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Move another outcome's diagnostics into this one, returning its entries
    pub fn absorb<U>(&mut self, other: ScanOutcome<U>) -> Vec<U> {
        self.diagnostics.extend(other.diagnostics);
        other.entries
    }
}

/// Finds marker directories and rule files below a scan root
pub struct Scanner<'a> {
    fs: &'a dyn FileSystem,
    layout: &'a Layout,
}

impl<'a> Scanner<'a> {
    pub fn new(fs: &'a dyn FileSystem, layout: &'a Layout) -> Self {
        Self { fs, layout }
    }

    /// Every directory below `root` named like the marker, at any depth
    ///
    /// Matching directories are descended into like any other, so a marker
    /// nested inside another marker is reported too.
    pub fn find_marker_directories(&self, root: &Path) -> ScanOutcome<PathBuf> {
        self.walk(root, |entry| {
            entry.is_dir() && entry.file_name() == self.layout.marker_dir.as_str()
        })
    }

    /// Every regular file below `dir` whose name ends with the rule extension
    pub fn find_rule_files(&self, dir: &Path) -> ScanOutcome<PathBuf> {
        self.walk(dir, |entry| {
            entry.is_file() && self.layout.is_rule_file_name(&entry.file_name())
        })
    }

    /// The marker directory directly under `root`, if there is one
    pub fn find_root_marker_directory(&self, root: &Path) -> Option<PathBuf> {
        let candidate = root.join(&self.layout.marker_dir);
        self.fs.is_dir(&candidate).then_some(candidate)
    }

    /// Marker directories below `root` other than `root/.cursor` that hold at
    /// least one rule file
    pub fn find_sub_marker_directories(&self, root: &Path) -> ScanOutcome<PathBuf> {
        let root_marker = root.join(&self.layout.marker_dir);
        let mut outcome = ScanOutcome::default();

        for dir in outcome.absorb(self.find_marker_directories(root)) {
            if dir == root_marker {
                continue;
            }
            let rules = outcome.absorb(self.find_rule_files(&dir));
            if !rules.is_empty() {
                outcome.entries.push(dir);
            }
        }

        outcome
    }

    /// Read every rule file under `dir`, with paths relative to `scan_root`
    ///
    /// Files that cannot be read as UTF-8 text are skipped with a diagnostic.
    pub fn load_rule_files(&self, dir: &Path, scan_root: &Path) -> ScanOutcome<SourceFile> {
        let mut outcome = ScanOutcome::default();

        for path in outcome.absorb(self.find_rule_files(dir)) {
            let raw_content = match self.fs.read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    outcome.diagnostics.push(ScanDiagnostic {
                        path,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let relative_path = path
                .strip_prefix(scan_root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());
            let base_name = self.base_name(&path);

            outcome.entries.push(SourceFile {
                absolute_path: path,
                relative_path,
                base_name,
                raw_content,
            });
        }

        outcome
    }

    fn base_name(&self, path: &Path) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        name.strip_suffix(self.layout.rule_extension.as_str())
            .map(str::to_string)
            .unwrap_or(name)
    }

    /// Depth-first, name-ordered walk below `root`, excluding `root` itself
    ///
    /// Symlinks are not followed. A directory that cannot be listed becomes a
    /// diagnostic and its subtree is skipped.
    fn walk<F>(&self, root: &Path, keep: F) -> ScanOutcome<PathBuf>
    where
        F: Fn(&DirEntry) -> bool,
    {
        let mut outcome = ScanOutcome::default();
        self.walk_into(root, &keep, &mut outcome);
        outcome
    }

    fn walk_into<F>(&self, dir: &Path, keep: &F, outcome: &mut ScanOutcome<PathBuf>)
    where
        F: Fn(&DirEntry) -> bool,
    {
        let entries = match self.fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                outcome.diagnostics.push(ScanDiagnostic {
                    path: dir.to_path_buf(),
                    message: e.to_string(),
                });
                return;
            }
        };

        for entry in entries {
            if keep(&entry) {
                outcome.entries.push(entry.path.clone());
            }
            if entry.is_dir() {
                self.walk_into(&entry.path, keep, outcome);
            }
        }
    }
}
