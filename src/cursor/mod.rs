//! Cursor-side input: locating and reading `.mdc` rules

pub mod frontmatter;
pub mod fs;
pub mod rule;
pub mod scanner;

// Re-exports for library consumers
pub use fs::{DirEntry, EntryKind, FileSystem, LocalFs};
pub use rule::{ParsedRule, RuleMetadata, SourceFile};
pub use scanner::{ScanDiagnostic, ScanOutcome, Scanner};
