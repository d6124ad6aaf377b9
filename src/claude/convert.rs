//! Writing rule bodies to their remapped locations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::remap::{PathRemapper, RemappedPath};
use crate::cursor::fs::FileSystem;
use crate::cursor::rule::ParsedRule;

/// A rule together with the place it was written to
#[derive(Debug, Clone)]
pub struct ConvertedRule<'r> {
    pub rule: &'r ParsedRule,
    pub target: RemappedPath,
}

/// Writes parsed rules into one output root
pub struct RuleConverter<'a> {
    fs: &'a dyn FileSystem,
    remapper: &'a PathRemapper<'a>,
    scope_root: PathBuf,
}

impl<'a> RuleConverter<'a> {
    /// `scope_root` is the directory rule paths are remapped relative to:
    /// the parent of the marker directory, or the scan root in flat mode.
    pub fn new(
        fs: &'a dyn FileSystem,
        remapper: &'a PathRemapper<'a>,
        scope_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            remapper,
            scope_root: scope_root.into(),
        }
    }

    /// Compute targets without writing anything
    pub fn plan<'r>(&self, rules: &'r [ParsedRule]) -> Vec<ConvertedRule<'r>> {
        rules
            .iter()
            .map(|rule| ConvertedRule {
                rule,
                target: self.remapper.remap(&self.scope_relative(rule)),
            })
            .collect()
    }

    /// Write each body verbatim, in input order
    ///
    /// The first failed write aborts the conversion.
    pub fn convert<'r>(&self, rules: &'r [ParsedRule]) -> Result<Vec<ConvertedRule<'r>>> {
        let converted = self.plan(rules);
        for item in &converted {
            write_body(self.fs, &item.target.output_path, &item.rule.body)?;
        }
        Ok(converted)
    }

    fn scope_relative(&self, rule: &ParsedRule) -> PathBuf {
        rule.absolute_path
            .strip_prefix(&self.scope_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| rule.relative_path.clone())
    }
}

/// Output paths of converted rules, in order
pub fn output_paths(converted: &[ConvertedRule<'_>]) -> Vec<PathBuf> {
    converted
        .iter()
        .map(|c| c.target.output_path.clone())
        .collect()
}

fn write_body(fs: &dyn FileSystem, path: &Path, body: &str) -> Result<()> {
    fs.write(path, body)
        .with_context(|| format!("Failed to write: {}", path.display()))
}
