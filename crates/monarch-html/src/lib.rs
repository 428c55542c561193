//! HTML tokenizer and parser for the Monarch renderer.
//!
//! # Scope
//!
//! This crate implements a deliberately small, forgiving HTML front end:
//! - **Tokenizer**: text runs, start tags with whitespace-separated
//!   attributes, end tags. `<!...>` declarations are recognised and dropped.
//! - **Tree builder**: a stack of unfinished elements, immediate attachment
//!   of void elements, and an implicit-tag loop that guarantees every
//!   document is `html` > (`head`, `body`).
//!
//! # Not Implemented
//!
//! - Character references (`&amp;` stays literal)
//! - Comments containing `>` and raw-text elements
//! - Mis-nesting recovery: a close tag pops whatever is on top

/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

use monarch_dom::DomTree;

pub use parser::{HTMLParser, ParseIssue, format_tree};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};

/// Tokenize and parse `html` in one step.
#[must_use]
pub fn parse_html(html: &str) -> DomTree {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    HTMLParser::new(tokenizer.into_tokens()).run()
}
