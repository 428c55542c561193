//! Painter: generates a display list from a layout tree.
//!
//! The walk is pre-order, so a box's own commands always precede those of
//! its descendants and later commands draw on top.

use std::collections::HashMap;

use monarch_common::warning::warn_once;
use monarch_dom::{DomTree, NodeId};

use super::{DisplayList, DrawCommand};
use crate::layout::{BoxId, BoxType, FontCache, LayoutTree, REPLACED_ELEMENTS, Rect};
use crate::style::ComputedStyle;

/// Color of the text-input caret.
const CARET_COLOR: &str = "black";

/// Painter that generates a display list from a layout tree.
pub struct Painter<'a> {
    dom: &'a DomTree,
    styles: &'a HashMap<NodeId, ComputedStyle>,
    fonts: &'a FontCache,
    focused: Option<NodeId>,
}

impl<'a> Painter<'a> {
    /// Create a painter with access to the document, its computed styles and
    /// the font cache.
    #[must_use]
    pub const fn new(
        dom: &'a DomTree,
        styles: &'a HashMap<NodeId, ComputedStyle>,
        fonts: &'a FontCache,
    ) -> Self {
        Self {
            dom,
            styles,
            fonts,
            focused: None,
        }
    }

    /// Draw a caret in the input element `node`.
    #[must_use]
    pub const fn with_focus(mut self, node: Option<NodeId>) -> Self {
        self.focused = node;
        self
    }

    /// Paint a layout tree and return the display list.
    #[must_use]
    pub fn paint(&self, layout: &LayoutTree) -> DisplayList {
        let mut display_list = DisplayList::new();
        for id in layout.preorder() {
            if self.should_paint(layout, id) {
                self.paint_box(layout, id, &mut display_list);
            }
        }
        log::debug!("painted {} commands", display_list.len());
        display_list
    }

    /// A block wrapping an `input` or `button` paints nothing itself; the
    /// Input box inside it draws the control.
    fn should_paint(&self, layout: &LayoutTree, id: BoxId) -> bool {
        let b = &layout[id];
        !(b.box_type == BoxType::Block
            && self
                .dom
                .tag_name(b.node)
                .is_some_and(|tag| REPLACED_ELEMENTS.contains(&tag)))
    }

    fn style(&self, node: NodeId) -> Option<&ComputedStyle> {
        let style = self.styles.get(&node);
        if style.is_none() {
            warn_once("Paint", &format!("no resolved style for node {}", node.0));
        }
        style
    }

    fn paint_box(&self, layout: &LayoutTree, id: BoxId, display_list: &mut DisplayList) {
        let b = &layout[id];
        match &b.box_type {
            BoxType::Block => {
                if let Some(color) = self.style(b.node).and_then(ComputedStyle::background_color) {
                    display_list.push(DrawCommand::Rect {
                        rect: b.rect(),
                        color: color.to_string(),
                    });
                }
            }
            BoxType::Text { word } => {
                let Some(style) = self.style(b.node) else {
                    return;
                };
                let key = b.font.unwrap_or_else(|| style.font_key());
                let metrics = self.fonts.get(key);
                display_list.push(DrawCommand::text(
                    b.x,
                    b.y,
                    word,
                    key,
                    metrics.as_ref(),
                    style.color(),
                ));
            }
            BoxType::Input => self.paint_input(layout, id, display_list),
            BoxType::Document | BoxType::Line => {}
        }
    }

    fn paint_input(&self, layout: &LayoutTree, id: BoxId, display_list: &mut DisplayList) {
        let b = &layout[id];
        let Some(style) = self.style(b.node) else {
            return;
        };
        if let Some(color) = style.background_color() {
            display_list.push(DrawCommand::Rect {
                rect: b.rect(),
                color: color.to_string(),
            });
        }

        let text = self.control_text(b.node);
        let key = b.font.unwrap_or_else(|| style.font_key());
        let metrics = self.fonts.get(key);
        display_list.push(DrawCommand::text(
            b.x,
            b.y,
            &text,
            key,
            metrics.as_ref(),
            style.color(),
        ));

        if self.focused == Some(b.node) {
            let caret_x = b.x + metrics.measure(&text);
            display_list.push(DrawCommand::Line {
                rect: Rect::new(caret_x, b.y, caret_x, b.y + b.height),
                color: CARET_COLOR.to_string(),
                thickness: 1.0,
            });
        }
    }

    /// The label of a control: an input's `value`, or a button's single text
    /// child.
    fn control_text(&self, node: NodeId) -> String {
        if self.dom.tag_name(node) == Some("input") {
            return self
                .dom
                .attribute(node, "value")
                .unwrap_or_default()
                .to_string();
        }
        let label = match self.dom.children(node) {
            [] => Some(""),
            [only] => self.dom.as_text(*only),
            _ => None,
        };
        label.map_or_else(
            || {
                warn_once("Paint", "ignoring markup inside button");
                String::new()
            },
            str::to_string,
        )
    }
}
