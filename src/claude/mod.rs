//! Claude-side output: converted rule files, the index and `CLAUDE.md`

pub mod companion;
pub mod convert;
pub mod index;
pub mod remap;

// Re-exports for library consumers
pub use companion::{CompanionChange, CompanionUpdater};
pub use convert::{ConvertedRule, RuleConverter};
pub use index::{render_index, Category, IndexEntry};
pub use remap::{PathRemapper, RemapMode, RemappedPath};
