//! Block and line geometry.
//!
//! Layout is top-down for position and width, bottom-up for height:
//! a box takes `x` and `width` from its parent and `y` from its previous
//! sibling (or the parent's top), lays out its children, then sums their
//! heights.

use std::collections::HashMap;
use std::rc::Rc;

use monarch_common::warning::warn_once;
use monarch_dom::{DomTree, NodeId};

use super::font_metrics::{FontCache, FontMetrics};
use super::inline::InlineLayout;
use super::layout_box::{BoxId, BoxType, LayoutTree};
use super::{BLOCK_ELEMENTS, EXCLUDED_TAGS, LEADING, LayoutConfig, REPLACED_ELEMENTS};
use crate::style::{ComputedStyle, FontKey};

/// How a block box arranges its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Child blocks stacked vertically.
    Block,
    /// Words and replaced elements broken into lines.
    Inline,
}

/// Decide how the block for `node` lays out its content.
///
/// Text, and the replaced elements, are inline. An element with any direct
/// block-level child element is block; with other children it is inline;
/// with none it is an empty block.
#[must_use]
pub fn layout_mode(dom: &DomTree, node: NodeId) -> LayoutMode {
    let Some(data) = dom.as_element(node) else {
        return LayoutMode::Inline;
    };
    if REPLACED_ELEMENTS.contains(&data.tag_name.as_str()) {
        return LayoutMode::Inline;
    }
    let children = dom.children(node);
    if children
        .iter()
        .any(|&child| dom.tag_name(child).is_some_and(|tag| BLOCK_ELEMENTS.contains(&tag)))
    {
        LayoutMode::Block
    } else if children.is_empty() {
        LayoutMode::Block
    } else {
        LayoutMode::Inline
    }
}

/// Whether `node` never gets a box.
#[must_use]
pub fn is_excluded(dom: &DomTree, node: NodeId) -> bool {
    dom.tag_name(node)
        .is_some_and(|tag| EXCLUDED_TAGS.contains(&tag))
}

/// Everything a layout pass reads.
pub struct LayoutContext<'a> {
    /// The document.
    pub dom: &'a DomTree,
    /// Resolved style of every node.
    pub styles: &'a HashMap<NodeId, ComputedStyle>,
    /// Font handles.
    pub fonts: &'a FontCache,
    /// Viewport and spacing constants.
    pub config: LayoutConfig,
}

impl LayoutContext<'_> {
    /// Font key for `node` from its resolved style. A node the cascade
    /// skipped panics in debug builds and falls back to the root font
    /// otherwise.
    pub(crate) fn font_key(&self, node: NodeId) -> FontKey {
        match self.styles.get(&node) {
            Some(style) => style.font_key(),
            None => {
                debug_assert!(false, "no resolved style for node {}", node.0);
                warn_once("Layout", &format!("no resolved style for node {}", node.0));
                ComputedStyle::root().font_key()
            }
        }
    }

    pub(crate) fn font(&self, key: FontKey) -> Rc<dyn FontMetrics> {
        self.fonts.get(key)
    }
}

/// Lay out the whole document.
///
/// The document box sits at the fixed margins and is as wide as the viewport
/// minus both horizontal margins; it wraps one block for the root element.
#[must_use]
pub fn layout_document(ctx: &LayoutContext<'_>) -> LayoutTree {
    let mut tree = LayoutTree::new();
    if ctx.dom.is_empty() {
        return tree;
    }
    let root = ctx.dom.root();
    let document = tree.push(BoxType::Document, root, None, None);
    tree[document].x = ctx.config.hstep;
    tree[document].y = ctx.config.vstep;
    tree[document].width = ctx.config.width - 2.0 * ctx.config.hstep;

    let child = tree.push(BoxType::Block, root, Some(document), None);
    layout_block(ctx, &mut tree, child);
    tree[document].height = tree[child].height;

    log::debug!(
        "laid out {} boxes, document height {}",
        tree.len(),
        tree[document].height
    );
    tree
}

/// Position from the parent and previous sibling: `x` and `width` from the
/// parent, `y` right below the previous sibling or at the parent's top.
fn stack(tree: &mut LayoutTree, id: BoxId) {
    let Some(parent) = tree[id].parent else {
        return;
    };
    let (parent_x, parent_y, parent_width) = (tree[parent].x, tree[parent].y, tree[parent].width);
    let y = match tree[id].previous {
        Some(previous) => tree[previous].y + tree[previous].height,
        None => parent_y,
    };
    let b = &mut tree[id];
    b.x = parent_x;
    b.y = y + b.gap_before;
    b.width = parent_width;
}

fn layout_block(ctx: &LayoutContext<'_>, tree: &mut LayoutTree, id: BoxId) {
    stack(tree, id);
    let node = tree[id].node;

    match layout_mode(ctx.dom, node) {
        LayoutMode::Block => {
            let mut previous = None;
            for &child in ctx.dom.children(node) {
                if is_excluded(ctx.dom, child) {
                    continue;
                }
                previous = Some(tree.push(BoxType::Block, child, Some(id), previous));
            }
            for child in tree[id].children.clone() {
                layout_block(ctx, tree, child);
            }
            tree[id].height = tree[id]
                .children
                .iter()
                .map(|&child| tree[child].height)
                .sum();
        }
        LayoutMode::Inline => {
            let trailing_gap = InlineLayout::new(ctx, tree, id).run(node);
            for line in tree[id].children.clone() {
                layout_line(ctx, tree, line);
            }
            let lines: f32 = tree[id]
                .children
                .iter()
                .map(|&line| tree[line].gap_before + tree[line].height)
                .sum();
            tree[id].height = lines + trailing_gap;
        }
    }

    #[cfg(feature = "layout-trace")]
    log::trace!(
        "block {:?} node {} at ({}, {}) {}x{}",
        id,
        node.0,
        tree[id].x,
        tree[id].y,
        tree[id].width,
        tree[id].height
    );
}

/// Lay out a line's children, then align them on a shared baseline.
///
/// An empty line (from a forced break) uses the font of its block as a strut.
fn layout_line(ctx: &LayoutContext<'_>, tree: &mut LayoutTree, id: BoxId) {
    stack(tree, id);
    let children = tree[id].children.clone();
    for &child in &children {
        layout_inline_box(ctx, tree, child);
    }

    let fonts: Vec<Rc<dyn FontMetrics>> = if children.is_empty() {
        vec![ctx.font(ctx.font_key(tree[id].node))]
    } else {
        children
            .iter()
            .map(|&child| {
                let key = tree[child]
                    .font
                    .unwrap_or_else(|| ctx.font_key(tree[child].node));
                ctx.font(key)
            })
            .collect()
    };
    let max_ascent = fonts.iter().map(|f| f.ascent()).fold(0.0_f32, f32::max);
    let max_descent = fonts.iter().map(|f| f.descent()).fold(0.0_f32, f32::max);

    let baseline = tree[id].y + LEADING * max_ascent;
    for (&child, font) in children.iter().zip(&fonts) {
        tree[child].y = baseline - font.ascent();
    }
    tree[id].height = LEADING * (max_ascent + max_descent);
}

/// Width, height and `x` of a text or input box. `y` is set by the line.
fn layout_inline_box(ctx: &LayoutContext<'_>, tree: &mut LayoutTree, id: BoxId) {
    let key = ctx.font_key(tree[id].node);
    let font = ctx.font(key);

    let width = match &tree[id].box_type {
        BoxType::Text { word } => font.measure(word),
        _ => ctx.config.input_width,
    };

    let x = match tree[id].previous {
        Some(previous) => {
            let space = tree[previous]
                .font
                .map_or_else(|| font.measure(" "), |k| ctx.font(k).measure(" "));
            tree[previous].x + tree[previous].width + space
        }
        None => tree[id].parent.map_or(0.0, |parent| tree[parent].x),
    };

    let b = &mut tree[id];
    b.font = Some(key);
    b.width = width;
    b.x = x;
    b.height = font.linespace();
}

