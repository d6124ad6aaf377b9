//! Naming conventions for rule discovery and generated output

use std::path::{Path, PathBuf};

/// Directory name that scopes a set of Cursor rules
pub const MARKER_DIR: &str = ".cursor";

/// Extension of Cursor rule files
pub const RULE_EXTENSION: &str = ".mdc";

/// Extension of converted markdown files
pub const OUTPUT_EXTENSION: &str = ".md";

/// Directory the converted rules are written to
pub const OUTPUT_DIR: &str = "c2c-rules";

/// Index file generated inside every output directory
pub const INDEX_FILE: &str = "_root.md";

/// Assistant-instructions file that receives the reference block
pub const COMPANION_FILE: &str = "CLAUDE.md";

/// Tag delimiting the injected reference block
pub const BLOCK_TAG: &str = "c2c-rules";

/// File and directory names used by every pipeline stage
///
/// `Layout::default()` describes the `.cursor` → `c2c-rules` convention. Tests
/// and library consumers can swap individual names without touching the stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub marker_dir: String,
    pub rule_extension: String,
    pub output_extension: String,
    pub output_dir: String,
    pub index_file: String,
    pub companion_file: String,
    pub block_tag: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            marker_dir: MARKER_DIR.to_string(),
            rule_extension: RULE_EXTENSION.to_string(),
            output_extension: OUTPUT_EXTENSION.to_string(),
            output_dir: OUTPUT_DIR.to_string(),
            index_file: INDEX_FILE.to_string(),
            companion_file: COMPANION_FILE.to_string(),
            block_tag: BLOCK_TAG.to_string(),
        }
    }
}

impl Layout {
    /// Output directory for a scope root (`<scope>/c2c-rules`)
    pub fn output_root_for(&self, scope_root: &Path) -> PathBuf {
        scope_root.join(&self.output_dir)
    }

    /// Index file inside an output directory (`<output>/_root.md`)
    pub fn index_path(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.index_file)
    }

    /// Companion file for a scope root (`<scope>/CLAUDE.md`)
    pub fn companion_path(&self, scope_root: &Path) -> PathBuf {
        scope_root.join(&self.companion_file)
    }

    /// Reference to the index as written inside the companion block
    pub fn index_reference(&self) -> String {
        format!("@{}/{}", self.output_dir, self.index_file)
    }

    /// Replace a trailing rule extension with the output extension
    ///
    /// Only a suffix match is rewritten: `a.mdc.mdc` becomes `a.mdc.md`.
    pub fn to_output_name(&self, name: &str) -> String {
        match name.strip_suffix(self.rule_extension.as_str()) {
            Some(stem) => format!("{}{}", stem, self.output_extension),
            None => name.to_string(),
        }
    }

    /// Whether a file name carries the rule extension
    pub fn is_rule_file_name(&self, name: &str) -> bool {
        name.ends_with(self.rule_extension.as_str())
    }
}
