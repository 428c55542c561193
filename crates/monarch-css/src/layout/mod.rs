//! Box layout.
//!
//! Turns a styled document into a tree of positioned boxes: one Document box,
//! Block boxes stacked vertically, and inside inline-mode blocks a sequence
//! of Line boxes holding one Text box per word (or an Input box per replaced
//! element), aligned on a shared baseline.

pub mod box_model;
pub mod font_metrics;
pub mod formatting_context;
mod inline;
pub mod layout_box;

pub use box_model::Rect;
pub use font_metrics::{ApproximateFontMetrics, ApproximateFonts, FontCache, FontMetrics, FontProvider};
pub use formatting_context::{LayoutContext, LayoutMode, is_excluded, layout_document, layout_mode};
pub use layout_box::{BoxId, BoxType, LayoutBox, LayoutTree};

/// Line height as a multiple of the tallest ascent plus descent.
pub const LEADING: f32 = 1.25;

/// Tags laid out as blocks. A container with any of these as a direct child
/// is in block mode; met during line breaking they add paragraph spacing.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "html",
    "body",
    "article",
    "section",
    "nav",
    "aside",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hgroup",
    "header",
    "footer",
    "address",
    "p",
    "hr",
    "pre",
    "blockquote",
    "ol",
    "ul",
    "menu",
    "li",
    "dl",
    "dt",
    "dd",
    "figure",
    "figcaption",
    "main",
    "div",
    "table",
    "form",
    "fieldset",
    "legend",
    "details",
    "summary",
];

/// Elements that never get a box.
pub const EXCLUDED_TAGS: &[&str] = &["head", "script", "style", "title", "meta", "link", "noscript"];

/// Atomic inline elements with a fixed intrinsic width.
pub const REPLACED_ELEMENTS: &[&str] = &["input", "button"];

/// Viewport and spacing constants for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Viewport width.
    pub width: f32,
    /// Horizontal page margin.
    pub hstep: f32,
    /// Vertical page margin, also the paragraph spacing.
    pub vstep: f32,
    /// Intrinsic width of input and button boxes.
    pub input_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            hstep: 13.0,
            vstep: 18.0,
            input_width: 200.0,
        }
    }
}
