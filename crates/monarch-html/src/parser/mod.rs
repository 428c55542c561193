//! Tree construction from tokens.

/// Stack-based tree builder with implicit-tag insertion.
pub mod tree_builder;

pub use tree_builder::{HEAD_TAGS, HTMLParser, ParseIssue, SELF_CLOSING_TAGS, format_tree};
