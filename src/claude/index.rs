//! The `_root.md` index listing every converted rule
//!
//! Rules are grouped by how Claude should pick them up: always, when the
//! description matches the task, or when a glob matches the files at hand.
//! Rules with none of these are converted but left out of the index.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::convert::ConvertedRule;
use crate::cursor::fs::FileSystem;
use crate::cursor::rule::RuleMetadata;

const HEADING: &str = "# Rules Collection";
const ALWAYS_APPLY_INTRO: &str = "you MUST read below files and STRICTLY FOLLOW as guidelines:";
const DESCRIPTION_INTRO: &str = "read below rules if description matches with your requirement:";
const GLOB_INTRO: &str = "read below rules if glob pattern matches with requirement related files:";

/// Index section a rule belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Category {
    AlwaysApply,
    Description(String),
    Glob(String),
    Uncategorized,
}

impl Category {
    /// Classify by priority: `alwaysApply: true`, then description, then globs
    pub fn classify(metadata: &RuleMetadata) -> Self {
        if metadata.is_always_apply() {
            Self::AlwaysApply
        } else if let Some(description) = metadata.description() {
            Self::Description(description)
        } else if let Some(globs) = metadata.globs() {
            Self::Glob(globs)
        } else {
            Self::Uncategorized
        }
    }
}

/// One line (or block) of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub display_name: String,
    pub link_path: String,
    pub category: Category,
}

/// Derive index entries, keeping rule order
pub fn build_entries(converted: &[ConvertedRule<'_>]) -> Vec<IndexEntry> {
    converted
        .iter()
        .map(|c| IndexEntry {
            display_name: c.rule.base_name.clone(),
            link_path: c.target.link_path.clone(),
            category: Category::classify(&c.rule.metadata),
        })
        .collect()
}

/// Render the index document
///
/// Output depends only on `entries`, so rendering the same rules twice gives
/// identical bytes. The document has no trailing newline.
pub fn render_index(entries: &[IndexEntry]) -> String {
    let mut content = format!("{}\n\n", HEADING);

    let always: Vec<&IndexEntry> = entries
        .iter()
        .filter(|e| e.category == Category::AlwaysApply)
        .collect();
    if !always.is_empty() {
        content.push_str(ALWAYS_APPLY_INTRO);
        content.push('\n');
        for entry in always {
            content.push_str(&format!("- {}: @{}\n", entry.display_name, entry.link_path));
        }
        content.push('\n');
    }

    let described: Vec<(&IndexEntry, &str)> = entries
        .iter()
        .filter_map(|e| match &e.category {
            Category::Description(d) => Some((e, d.as_str())),
            _ => None,
        })
        .collect();
    render_detail_section(&mut content, DESCRIPTION_INTRO, "description", &described);

    let globbed: Vec<(&IndexEntry, &str)> = entries
        .iter()
        .filter_map(|e| match &e.category {
            Category::Glob(g) => Some((e, g.as_str())),
            _ => None,
        })
        .collect();
    render_detail_section(&mut content, GLOB_INTRO, "glob", &globbed);

    content.trim_end().to_string()
}

fn render_detail_section(
    content: &mut String,
    intro: &str,
    label: &str,
    items: &[(&IndexEntry, &str)],
) {
    if items.is_empty() {
        return;
    }

    content.push_str(intro);
    content.push('\n');
    for (entry, value) in items {
        content.push_str(&format!("- {}\n", entry.display_name));
        content.push_str(&format!("    - {}: {}\n", label, value));
        content.push_str(&format!("    - path: {}\n", entry.link_path));
    }
    content.push('\n');
}

/// Render and write `<output root>/_root.md`, returning its path
pub fn generate_index(
    fs: &dyn FileSystem,
    index_path: &Path,
    converted: &[ConvertedRule<'_>],
) -> Result<PathBuf> {
    let content = render_index(&build_entries(converted));
    fs.write(index_path, &content)
        .with_context(|| format!("Failed to write: {}", index_path.display()))?;
    Ok(index_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn meta(value: Value) -> RuleMetadata {
        match value {
            Value::Object(map) => RuleMetadata::new(map),
            _ => RuleMetadata::default(),
        }
    }

    fn entry(name: &str, link: &str, metadata: Value) -> IndexEntry {
        IndexEntry {
            display_name: name.to_string(),
            link_path: link.to_string(),
            category: Category::classify(&meta(metadata)),
        }
    }

    #[test]
    fn test_classification_priority() {
        let cases = [
            (json!({"alwaysApply": true, "description": "d", "globs": "*.js"}), Category::AlwaysApply),
            (json!({"alwaysApply": false, "description": "d", "globs": "*.js"}), Category::Description("d".into())),
            (json!({"description": "d", "globs": "*.js"}), Category::Description("d".into())),
            (json!({"description": "", "globs": "*.js"}), Category::Glob("*.js".into())),
            (json!({"alwaysApply": "true", "globs": "*.js"}), Category::Glob("*.js".into())),
            (json!({"globs": ""}), Category::Uncategorized),
            (json!({}), Category::Uncategorized),
        ];

        for (metadata, expected) in cases {
            assert_eq!(Category::classify(&meta(metadata.clone())), expected, "{}", metadata);
        }
    }

    #[test]
    fn test_render_full_document() {
        let entries = vec![
            entry("global", "global.md", json!({"alwaysApply": true})),
            entry("api", "backend/api.md", json!({"description": "API guidelines"})),
            entry("vue", "vue.md", json!({"globs": "**/*.vue"})),
            entry("plain", "plain.md", json!({})),
        ];

        let expected = "# Rules Collection\n\
\n\
you MUST read below files and STRICTLY FOLLOW as guidelines:\n\
- global: @global.md\n\
\n\
read below rules if description matches with your requirement:\n\
- api\n    - description: API guidelines\n    - path: backend/api.md\n\
\n\
read below rules if glob pattern matches with requirement related files:\n\
- vue\n    - glob: **/*.vue\n    - path: vue.md";

        assert_eq!(render_index(&entries), expected);
    }

    #[test]
    fn test_empty_sections_omitted() {
        let entries = vec![entry("vue", "vue.md", json!({"globs": "**/*.vue"}))];
        let rendered = render_index(&entries);

        assert!(!rendered.contains(ALWAYS_APPLY_INTRO));
        assert!(!rendered.contains(DESCRIPTION_INTRO));
        assert!(rendered.contains(GLOB_INTRO));
    }

    #[test]
    fn test_empty_index_is_heading_only() {
        assert_eq!(render_index(&[]), "# Rules Collection");
        assert_eq!(
            render_index(&[entry("plain", "plain.md", json!({}))]),
            "# Rules Collection"
        );
    }

    #[test]
    fn test_description_reproduced_verbatim() {
        let entries = vec![entry(
            "react",
            "react.md",
            json!({"description": "React: hooks & \"components\""}),
        )];
        assert!(render_index(&entries).contains("    - description: React: hooks & \"components\""));
    }

    #[test]
    fn test_render_is_idempotent() {
        let entries = vec![
            entry("b", "x/b.md", json!({"globs": "*.rs"})),
            entry("a", "a.md", json!({"alwaysApply": true})),
            entry("c", "c.md", json!({"description": "c"})),
        ];
        assert_eq!(render_index(&entries), render_index(&entries));
        assert!(!render_index(&entries).ends_with('\n'));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let entries = vec![
            entry("glob-rule", "glob-rule.md", json!({"globs": "**/*.md"})),
            entry("desc-rule", "desc-rule.md", json!({"description": "d", "globs": "**/*.css"})),
            entry("priority-rule", "priority-rule.md", json!({"alwaysApply": true, "description": "x"})),
        ];
        let rendered = render_index(&entries);

        let priority = rendered.find("priority-rule").unwrap();
        let desc = rendered.find("desc-rule").unwrap();
        let glob = rendered.find("glob-rule").unwrap();
        assert!(priority < desc);
        assert!(desc < glob);
    }

    #[test]
    fn test_boolean_description_is_listed() {
        let (metadata, _) = crate::cursor::frontmatter::split_front_matter(
            "---\ndescription: true\nglobs: \"*.ts\"\n---\nBody",
        );
        assert_eq!(
            Category::classify(&metadata),
            Category::Description("true".into())
        );

        let (metadata, _) = crate::cursor::frontmatter::split_front_matter(
            "---\ndescription: false\nglobs: \"*.ts\"\n---\nBody",
        );
        assert_eq!(Category::classify(&metadata), Category::Glob("*.ts".into()));
    }
}
