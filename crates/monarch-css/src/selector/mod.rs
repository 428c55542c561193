//! Selector model and matching.
//!
//! Two forms are supported: a tag name, and a descendant chain of tag names
//! (`a b c` matches a `c` with a `b` ancestor that itself has an `a`
//! ancestor). Priority is one per tag word and only orders the cascade.

use std::fmt;

use monarch_dom::{DomTree, NodeId};
use thiserror::Error;

use crate::parser::CSSParser;

/// Errors from parsing a standalone selector at a public entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Nothing but whitespace.
    #[error("empty selector")]
    Empty,
    /// A character that cannot appear in a tag word.
    #[error("unexpected {found:?} at offset {offset} in selector")]
    UnexpectedCharacter {
        /// Offending character.
        found: char,
        /// Character offset into the selector text.
        offset: usize,
    },
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches elements with this (case-folded) tag name.
    Tag {
        /// Tag name to match.
        name: String,
    },
    /// Matches nodes matching `descendant` that have a strict ancestor
    /// matching `ancestor`.
    Descendant {
        /// Constraint on some ancestor.
        ancestor: Box<Selector>,
        /// Constraint on the node itself.
        descendant: Box<Selector>,
        /// Sum of both sides' priorities.
        priority: u32,
    },
}

impl Selector {
    /// A tag selector.
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self::Tag {
            name: name.to_string(),
        }
    }

    /// A descendant selector; its priority is the sum of both parts.
    #[must_use]
    pub fn descendant(ancestor: Self, descendant: Self) -> Self {
        let priority = ancestor.priority() + descendant.priority();
        Self::Descendant {
            ancestor: Box::new(ancestor),
            descendant: Box::new(descendant),
            priority,
        }
    }

    /// Cascade priority: one per tag word.
    #[must_use]
    pub const fn priority(&self) -> u32 {
        match self {
            Self::Tag { .. } => 1,
            Self::Descendant { priority, .. } => *priority,
        }
    }

    /// Whether the node `id` in `tree` matches.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        match self {
            Self::Tag { name } => tree.tag_name(id) == Some(name.as_str()),
            Self::Descendant {
                ancestor,
                descendant,
                ..
            } => {
                descendant.matches(tree, id)
                    && tree
                        .ancestors(id)
                        .any(|candidate| ancestor.matches(tree, candidate))
            }
        }
    }

    /// Every node under the root that matches, in document order.
    #[must_use]
    pub fn select_all(&self, tree: &DomTree) -> Vec<NodeId> {
        if tree.is_empty() {
            return Vec::new();
        }
        tree.descendants(tree.root())
            .into_iter()
            .filter(|&id| self.matches(tree, id))
            .collect()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag { name } => f.write_str(name),
            Self::Descendant {
                ancestor,
                descendant,
                ..
            } => write!(f, "{ancestor} {descendant}"),
        }
    }
}

/// Parse a single selector such as `div p`.
///
/// # Errors
///
/// Returns [`SelectorError::Empty`] for blank text and
/// [`SelectorError::UnexpectedCharacter`] for anything outside the
/// supported grammar (combinators, classes written with other punctuation,
/// a `{`).
pub fn parse_selector(text: &str) -> Result<Selector, SelectorError> {
    if text.trim().is_empty() {
        return Err(SelectorError::Empty);
    }
    let mut parser = CSSParser::new(text);
    parser.whitespace();
    let selector = parser.selector().map_err(|err| match err.found {
        Some(found) => SelectorError::UnexpectedCharacter {
            found,
            offset: err.offset,
        },
        None => SelectorError::Empty,
    })?;
    if parser.at_end() {
        Ok(selector)
    } else {
        let err = parser.error("end of selector");
        Err(SelectorError::UnexpectedCharacter {
            found: err.found.unwrap_or('{'),
            offset: err.offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_counts_tag_words() {
        assert_eq!(parse_selector("p").unwrap().priority(), 1);
        assert_eq!(parse_selector("div p").unwrap().priority(), 2);
        assert_eq!(parse_selector("html body div p").unwrap().priority(), 4);
    }

    #[test]
    fn chains_left_to_right() {
        let selector = parse_selector("a b c").unwrap();
        let Selector::Descendant {
            ancestor,
            descendant,
            ..
        } = &selector
        else {
            panic!("expected descendant selector");
        };
        assert_eq!(**descendant, Selector::tag("c"));
        assert_eq!(ancestor.to_string(), "a b");
        assert_eq!(selector.to_string(), "a b c");
    }

    #[test]
    fn tag_names_are_case_folded() {
        assert_eq!(parse_selector("  DIV  ").unwrap(), Selector::tag("div"));
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert_eq!(parse_selector("   "), Err(SelectorError::Empty));
        assert_eq!(
            parse_selector("ul > li"),
            Err(SelectorError::UnexpectedCharacter {
                found: '>',
                offset: 3
            })
        );
        assert!(matches!(
            parse_selector("p {"),
            Err(SelectorError::UnexpectedCharacter { found: '{', .. })
        ));
    }
}
