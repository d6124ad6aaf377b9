//! Shared utilities for commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Strip Windows extended-length path prefix (\\?\)
///
/// On Windows, `canonicalize()` returns paths like `\\?\C:\path`, which would
/// leak into every printed path.
pub fn strip_windows_prefix(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
        PathBuf::from(stripped)
    } else {
        path.to_path_buf()
    }
}

/// Resolve the scan root, defaulting to the current directory
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let root = match root {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let root = root
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", root.display()))?;

    Ok(strip_windows_prefix(&root))
}

/// Path shown to the user: relative to `base` when it lies below it
pub fn display_relative(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_strip_windows_prefix() {
        let result = strip_windows_prefix(Path::new(r"\\?\C:\path\to\project"));
        assert_eq!(result, PathBuf::from(r"C:\path\to\project"));
    }

    #[test]
    fn test_strip_windows_prefix_unix() {
        let result = strip_windows_prefix(Path::new("/path/to/project"));
        assert_eq!(result, PathBuf::from("/path/to/project"));
    }

    #[test]
    fn test_resolve_root_missing() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_root(Some(&tmp.path().join("missing"))).unwrap_err();
        assert!(err.to_string().contains("Path does not exist"));
    }

    #[test]
    fn test_resolve_root_existing() {
        let tmp = TempDir::new().unwrap();
        let resolved = resolve_root(Some(tmp.path())).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());
    }

    #[test]
    fn test_display_relative() {
        let base = Path::new("/work");
        assert_eq!(
            display_relative(Path::new("/work/c2c-rules/global.md"), base),
            Path::new("c2c-rules").join("global.md").display().to_string()
        );
        assert_eq!(display_relative(Path::new("/other/x.md"), base), "/other/x.md");
        assert_eq!(display_relative(Path::new("/work"), base), "/work");
    }
}
