//! Reference block injected into `CLAUDE.md`
//!
//! The file keeps whatever the user wrote and gains one block at the end:
//!
//! ```text
//! <c2c-rules>
//! - @c2c-rules/_root.md
//! </c2c-rules>
//! ```
//!
//! Every existing block is removed before the fresh one is appended, so any
//! number of runs (or hand-pasted duplicates) collapse to a single block.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Layout;
use crate::cursor::fs::FileSystem;

/// Whether the companion file existed before the update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanionChange {
    Created,
    Updated,
}

/// Maintains the reference block in a companion file
pub struct CompanionUpdater<'a> {
    fs: &'a dyn FileSystem,
    layout: &'a Layout,
    block_pattern: Regex,
}

impl<'a> CompanionUpdater<'a> {
    pub fn new(fs: &'a dyn FileSystem, layout: &'a Layout) -> Result<Self> {
        let tag = regex::escape(&layout.block_tag);
        let block_pattern = Regex::new(&format!(r"(?s)<{tag}>.*?</{tag}>"))
            .context("Failed to build companion block pattern")?;
        Ok(Self {
            fs,
            layout,
            block_pattern,
        })
    }

    /// The block written into the companion file
    pub fn block(&self) -> String {
        format!(
            "<{tag}>\n- {reference}\n</{tag}>",
            tag = self.layout.block_tag,
            reference = self.layout.index_reference()
        )
    }

    /// Remove old blocks from `content` and append a fresh one
    pub fn apply(&self, content: &str) -> String {
        let stripped = self.block_pattern.replace_all(content, "");
        let rest = stripped.trim();

        if rest.is_empty() {
            self.block()
        } else {
            format!("{}\n\n{}", rest, self.block())
        }
    }

    /// Update `<scope_root>/CLAUDE.md`, creating it if needed
    pub fn update(&self, scope_root: &Path) -> Result<(PathBuf, CompanionChange)> {
        let path = self.layout.companion_path(scope_root);

        let (existing, change) = match self.fs.read_to_string(&path) {
            Ok(content) => (content, CompanionChange::Updated),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                (String::new(), CompanionChange::Created)
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read: {}", path.display()))
            }
        };

        self.fs
            .write(&path, &self.apply(&existing))
            .with_context(|| format!("Failed to write: {}", path.display()))?;

        Ok((path, change))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::fs::LocalFs;
    use std::fs;
    use tempfile::TempDir;

    const BLOCK: &str = "<c2c-rules>\n- @c2c-rules/_root.md\n</c2c-rules>";

    fn updater(layout: &Layout) -> CompanionUpdater<'_> {
        CompanionUpdater::new(&LocalFs, layout).unwrap()
    }

    #[test]
    fn test_empty_content_becomes_block() {
        let layout = Layout::default();
        assert_eq!(updater(&layout).apply(""), BLOCK);
        assert_eq!(updater(&layout).apply("  \n\n\t"), BLOCK);
    }

    #[test]
    fn test_existing_content_gets_blank_line() {
        let layout = Layout::default();
        let result = updater(&layout).apply("# Project\n\nSome content.\n");
        assert_eq!(result, format!("# Project\n\nSome content.\n\n{}", BLOCK));
    }

    #[test]
    fn test_multiple_stale_blocks_collapse() {
        let layout = Layout::default();
        let content = "<c2c-rules>\n- @old/_root.md\n</c2c-rules>\n# Notes\n\n<c2c-rules>\nstale\nlines\n</c2c-rules>\nTail";
        let result = updater(&layout).apply(content);

        assert_eq!(result.matches("<c2c-rules>").count(), 1);
        assert_eq!(result.matches("</c2c-rules>").count(), 1);
        assert!(result.ends_with(BLOCK));
        assert!(!result.contains("@old/_root.md"));
        assert!(result.contains("# Notes"));
        assert!(result.contains("Tail"));
    }

    #[test]
    fn test_update_creates_then_updates() {
        let tmp = TempDir::new().unwrap();
        let layout = Layout::default();
        let updater = updater(&layout);

        let (path, change) = updater.update(tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("CLAUDE.md"));
        assert_eq!(change, CompanionChange::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), BLOCK);

        let (_, change) = updater.update(tmp.path()).unwrap();
        assert_eq!(change, CompanionChange::Updated);
    }

    #[test]
    fn test_repeated_updates_converge() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CLAUDE.md");
        fs::write(
            &path,
            "# Existing Project Documentation\n\nSome content here.\n\n## Another section\n\nMore content.",
        )
        .unwrap();

        let layout = Layout::default();
        let updater = updater(&layout);
        updater.update(tmp.path()).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        for _ in 0..3 {
            updater.update(tmp.path()).unwrap();
        }
        let last = fs::read_to_string(&path).unwrap();

        assert_eq!(first, last);
        assert_eq!(last.matches("<c2c-rules>").count(), 1);
        assert!(last.starts_with("# Existing Project Documentation"));
        assert!(last.ends_with(BLOCK));
    }
}
