//! Mapping from rule source paths to output files and index links
//!
//! Given `frontend/.cursor/api/rest.mdc`:
//!
//! | Mode        | Link path               | Output file                        |
//! |-------------|-------------------------|------------------------------------|
//! | `PerMarker` | `api/rest.md`           | `<output root>/api/rest.md`        |
//! | `Flat`      | `frontend/api/rest.md`  | `<output root>/frontend/api/rest.md` |
//!
//! Link paths always use `/`, whatever separator the source path used.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Layout;

/// How much of the source path survives into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemapMode {
    /// One output tree per marker directory: keep what follows the marker
    PerMarker,
    /// One shared output tree: keep the project path in front of the marker too
    Flat,
}

/// Where a rule ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemappedPath {
    /// `/`-joined path relative to the output root, used in the index
    pub link_path: String,
    /// File the converted rule is written to
    pub output_path: PathBuf,
}

/// Computes output locations for one output root
pub struct PathRemapper<'a> {
    layout: &'a Layout,
    output_root: PathBuf,
    mode: RemapMode,
}

impl<'a> PathRemapper<'a> {
    pub fn new(layout: &'a Layout, output_root: impl Into<PathBuf>, mode: RemapMode) -> Self {
        Self {
            layout,
            output_root: output_root.into(),
            mode,
        }
    }

    /// Remap a path relative to the scope root
    ///
    /// The first marker segment is the one stripped; later ones are kept as
    /// ordinary directories. Without any marker segment only the file name is
    /// kept.
    pub fn remap(&self, relative_path: &Path) -> RemappedPath {
        let segments = self.link_segments(relative_path);

        let mut output_path = self.output_root.clone();
        for segment in &segments {
            output_path.push(segment);
        }

        RemappedPath {
            link_path: segments.join("/"),
            output_path,
        }
    }

    fn link_segments(&self, relative_path: &Path) -> Vec<String> {
        let raw = relative_path.to_string_lossy();
        let parts: Vec<&str> = raw
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();

        let marker = self.layout.marker_dir.as_str();
        let mut segments: Vec<String> = match parts.iter().position(|p| *p == marker) {
            Some(idx) => {
                let after = &parts[idx + 1..];
                match self.mode {
                    RemapMode::PerMarker => after.iter().map(|s| s.to_string()).collect(),
                    RemapMode::Flat => parts[..idx]
                        .iter()
                        .chain(after)
                        .map(|s| s.to_string())
                        .collect(),
                }
            }
            None => parts.last().map(|s| s.to_string()).into_iter().collect(),
        };

        if let Some(last) = segments.last_mut() {
            *last = self.layout.to_output_name(last);
        }

        segments
    }
}
