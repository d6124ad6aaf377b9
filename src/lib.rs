//! c2c library
//!
//! Converts Cursor IDE rule files (`.cursor/**/*.mdc`) into plain markdown
//! trees for Claude: one `c2c-rules/` directory per rule set, an `_root.md`
//! index sorting the rules by how they apply, and a reference block in
//! `CLAUDE.md`.

pub mod claude;
pub mod config;
pub mod cursor;
