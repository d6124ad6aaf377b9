//! Filesystem access used by every pipeline stage
//!
//! Stages take a `&dyn FileSystem` instead of calling `std::fs` directly, so a
//! test can hand in an implementation that fails or records writes.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a directory entry points at, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Other,
}

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Text file operations needed by the conversion pipeline
pub trait FileSystem {
    /// Read a whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write text to a file, creating missing parent directories first
    ///
    /// Content is written byte-for-byte; line endings are not normalized.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Whether `path` exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Direct children of `path`, sorted by file name
    ///
    /// Fails when the directory itself cannot be listed.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
}

/// The local disk
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents.as_bytes())
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry?;
                let file_type = entry.file_type();
                let kind = if file_type.is_dir() {
                    EntryKind::Dir
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };
                Ok(DirEntry::new(entry.into_path(), kind))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("a").join("b").join("c.md");

        LocalFs.write(&target, "hello").unwrap();

        assert!(target.is_file());
        assert!(LocalFs.is_dir(&tmp.path().join("a").join("b")));
        assert_eq!(LocalFs.read_to_string(&target).unwrap(), "hello");
    }

    #[test]
    fn test_write_keeps_crlf() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("crlf.md");

        LocalFs.write(&target, "one\r\ntwo\r\n").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"one\r\ntwo\r\n");
    }

    #[test]
    fn test_read_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFs
            .read_to_string(&tmp.path().join("missing.md"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_dir_sorted_and_shallow() {
        let tmp = TempDir::new().unwrap();
        LocalFs.write(&tmp.path().join("b.mdc"), "b").unwrap();
        LocalFs.write(&tmp.path().join("a").join("nested.mdc"), "n").unwrap();

        let entries = LocalFs.read_dir(tmp.path()).unwrap();

        assert_eq!(
            entries,
            vec![
                DirEntry::new(tmp.path().join("a"), EntryKind::Dir),
                DirEntry::new(tmp.path().join("b.mdc"), EntryKind::File),
            ]
        );
        assert_eq!(entries[1].file_name(), "b.mdc");
    }

    #[test]
    fn test_read_dir_missing_directory() {
        let tmp = TempDir::new().unwrap();
        assert!(LocalFs.read_dir(&tmp.path().join("missing")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_dir_does_not_follow_symlinks() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();

        let entries = LocalFs.read_dir(tmp.path()).unwrap();

        assert_eq!(entries[0], DirEntry::new(tmp.path().join("link"), EntryKind::Other));
        assert_eq!(entries[1], DirEntry::new(tmp.path().join("real"), EntryKind::Dir));
    }
}
