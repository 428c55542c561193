//! HTML tokenizer module.
//!
//! Splits source text into text runs and tags. Tag text is split on
//! whitespace into a name and `key=value` attributes; names and keys are
//! case-folded.

/// Two-state scanner.
pub mod scanner;
/// Token types produced by the tokenizer.
pub mod token;

pub use scanner::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, Token};
