//! Front matter extraction for `.mdc` rule files
//!
//! A rule may start with a YAML block between two `---` lines:
//!
//! ```text
//! ---
//! description: API guidelines
//! globs: src/api/**/*.ts
//! alwaysApply: false
//! ---
//! # Body
//! ```
//!
//! Anything that does not look exactly like that is treated as plain body text.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

use super::rule::{ParsedRule, RuleMetadata, SourceFile};

/// Opening delimiter, lazily matched block, closing delimiter and one line break.
/// Line breaks may be `\n` or `\r\n`.
static FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---\r?\n((?s:.*?))\r?\n---\r?\n").unwrap());

/// Why a delimited block could not be used as metadata
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter cannot be represented as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("front matter is not a key-value mapping")]
    NotMapping,
}

/// Split raw rule text into metadata and body
///
/// Never fails: a malformed block leaves the whole text as body with empty
/// metadata.
pub fn split_front_matter(text: &str) -> (RuleMetadata, String) {
    let Some(caps) = FRONT_MATTER.captures(text) else {
        return (RuleMetadata::default(), text.to_string());
    };

    let block = caps.get(1).map_or("", |m| m.as_str());
    let matched_len = caps.get(0).map_or(0, |m| m.end());

    match parse_metadata(block) {
        Ok(metadata) => (metadata, text[matched_len..].trim().to_string()),
        Err(_) => (RuleMetadata::default(), text.to_string()),
    }
}

/// Parse the text between the delimiters
///
/// An empty or comment-only block yields empty metadata.
pub fn parse_metadata(block: &str) -> Result<RuleMetadata, FrontMatterError> {
    let blank = block.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(RuleMetadata::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(block)?;
    match serde_json::to_value(yaml)? {
        Value::Object(fields) => Ok(RuleMetadata::new(fields)),
        Value::Null => Ok(RuleMetadata::default()),
        _ => Err(FrontMatterError::NotMapping),
    }
}

/// Parse one source file
pub fn parse_rule(file: &SourceFile) -> ParsedRule {
    let (metadata, body) = split_front_matter(&file.raw_content);
    ParsedRule {
        metadata,
        body,
        base_name: file.base_name.clone(),
        relative_path: file.relative_path.clone(),
        absolute_path: file.absolute_path.clone(),
    }
}

/// Parse source files, keeping their order
pub fn parse_rules(files: &[SourceFile]) -> Vec<ParsedRule> {
    files.iter().map(parse_rule).collect()
}
