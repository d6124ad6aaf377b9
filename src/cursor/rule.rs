//! Rule files as read from disk and after front matter is split off

use serde_json::{Map, Value};
use std::path::PathBuf;

/// A rule file found under a `.cursor` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute location on disk
    pub absolute_path: PathBuf,
    /// Location relative to the scan root
    pub relative_path: PathBuf,
    /// File name without the rule extension
    pub base_name: String,
    /// File content as read
    pub raw_content: String,
}

/// Front matter fields of a rule
///
/// Values are kept exactly as the YAML produced them. Only `description`,
/// `globs` and `alwaysApply` are ever read; other keys are carried along.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleMetadata {
    fields: Map<String, Value>,
}

impl RuleMetadata {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw value of any key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Raw `alwaysApply` value, not coerced
    pub fn always_apply(&self) -> Option<&Value> {
        self.fields.get("alwaysApply")
    }

    /// True only for a boolean `alwaysApply: true`
    pub fn is_always_apply(&self) -> bool {
        matches!(self.always_apply(), Some(Value::Bool(true)))
    }

    /// Description text, if present and non-empty
    pub fn description(&self) -> Option<String> {
        self.fields.get("description").and_then(field_text)
    }

    /// Glob expression, if present and non-empty
    ///
    /// A list of globs is joined with commas, the same shape Cursor writes
    /// for multiple patterns.
    pub fn globs(&self) -> Option<String> {
        self.fields.get("globs").and_then(field_text)
    }
}

/// Text for a set field: non-empty strings, numbers and `true` as written,
/// lists of those comma-joined. `false`, null, empty values and mappings
/// count as unset.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(",");
            (!joined.is_empty()).then_some(joined)
        }
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// A rule with its front matter separated from the body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRule {
    pub metadata: RuleMetadata,
    /// Content written to the converted file
    pub body: String,
    pub base_name: String,
    pub relative_path: PathBuf,
    pub absolute_path: PathBuf,
}
