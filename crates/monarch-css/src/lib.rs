//! Stylesheets, cascade, box layout and paint for the Monarch renderer.
//!
//! # Scope
//!
//! This crate implements everything between a parsed document and a list of
//! drawing commands:
//! - **Parser**: rules of the form `selector { name: value; ... }` and
//!   inline `style` attribute bodies. Malformed rules and declarations are
//!   skipped.
//! - **Selectors**: tag selectors and descendant chains, with a priority
//!   that orders the cascade.
//! - **Cascade**: default rules, linked stylesheets and inline styles,
//!   inheritance of font and color properties, percentage font sizes.
//! - **Layout**: document, block, line, text and input boxes; line breaking
//!   against the viewport width; baseline alignment across font sizes.
//! - **Paint**: background rectangles, text runs, form controls and the
//!   input caret.
//!
//! # Not Implemented
//!
//! - Class, id, attribute and pseudo selectors
//! - The box model (margins, borders, padding)
//! - `@` rules, comments and `!important`

/// Style cascade.
pub mod cascade;
/// Box layout.
pub mod layout;
/// Display list generation.
pub mod paint;
/// Stylesheet parser.
pub mod parser;
/// Selectors and matching.
pub mod selector;
/// Computed style values.
pub mod style;
/// Built-in default stylesheet.
pub mod ua_stylesheet;

pub use cascade::{collect_rules, compute_styles, linked_stylesheets};
pub use layout::{
    BoxId, BoxType, FontCache, FontMetrics, FontProvider, LayoutBox, LayoutConfig, LayoutContext,
    LayoutTree, Rect, layout_document,
};
pub use paint::{DisplayList, DrawCommand, Painter};
pub use parser::{CSSParser, Declaration, StyleRule, Stylesheet, parse_inline_style, parse_stylesheet};
pub use selector::{Selector, SelectorError, parse_selector};
pub use style::{ComputedStyle, FontKey, FontSlant, FontWeight};
pub use ua_stylesheet::default_stylesheet;
