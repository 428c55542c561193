//! The box tree.
//!
//! Boxes live in an arena indexed by [`BoxId`]. Each box owns its ordered
//! child list; `parent` and `previous` are non-owning lookups used while
//! computing geometry and never for downward traversal. The tree is rebuilt
//! from scratch on every layout pass.

use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use monarch_dom::{DomTree, NodeId};

use super::box_model::Rect;
use crate::style::FontKey;

/// A type-safe index into the box tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub usize);

impl BoxId {
    /// The document box is always the first box allocated.
    pub const ROOT: BoxId = BoxId(0);
}

/// The kinds of layout box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxType {
    /// The single box for the whole page.
    Document,
    /// A block stacked vertically in its parent.
    Block,
    /// One line of inline content.
    Line,
    /// One word of text.
    Text {
        /// The word, without surrounding whitespace.
        word: String,
    },
    /// An atomic replaced element (`input`, `button`).
    Input,
}

/// A box in the arena.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// What kind of box this is.
    pub box_type: BoxType,
    /// The document node the box was generated for. A line box points at
    /// the node of its containing block.
    pub node: NodeId,
    /// Non-owning reference to the parent box.
    pub parent: Option<BoxId>,
    /// Non-owning reference to the preceding sibling, used for stacking and
    /// horizontal placement.
    pub previous: Option<BoxId>,
    /// Owned children in order.
    pub children: Vec<BoxId>,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Paragraph spacing above a line box.
    pub gap_before: f32,
    /// Font resolved for text and input boxes.
    pub font: Option<FontKey>,
}

impl LayoutBox {
    /// The box's border rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.x, self.y, self.width, self.height)
    }
}

/// Arena of layout boxes.
#[derive(Debug, Clone, Default)]
pub struct LayoutTree {
    boxes: Vec<LayoutBox>,
}

impl LayoutTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Allocate a box and append it to `parent`'s children.
    pub fn push(
        &mut self,
        box_type: BoxType,
        node: NodeId,
        parent: Option<BoxId>,
        previous: Option<BoxId>,
    ) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(LayoutBox {
            box_type,
            node,
            parent,
            previous,
            children: Vec::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            gap_before: 0.0,
            font: None,
        });
        if let Some(parent) = parent {
            self.boxes[parent.0].children.push(id);
        }
        id
    }

    /// Get a box by its ID.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&LayoutBox> {
        self.boxes.get(id.0)
    }

    /// The document box, if layout produced anything.
    #[must_use]
    pub fn root(&self) -> Option<BoxId> {
        (!self.boxes.is_empty()).then_some(BoxId::ROOT)
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the tree has no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Children of a box.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.get(id).map_or(&[], |b| b.children.as_slice())
    }

    /// Height of the document box, 0 for an empty tree.
    #[must_use]
    pub fn document_height(&self) -> f32 {
        self.root().map_or(0.0, |root| self[root].height)
    }

    /// All boxes in pre-order (node before children).
    #[must_use]
    pub fn preorder(&self) -> Vec<BoxId> {
        let mut out = Vec::with_capacity(self.boxes.len());
        let mut stack: Vec<BoxId> = self.root().into_iter().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// The last box in pre-order whose rectangle contains the point: the
    /// deepest, latest box under it.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<BoxId> {
        self.preorder()
            .into_iter()
            .rev()
            .find(|&id| self[id].rect().contains_point(x, y))
    }

    /// Render the tree as an indented outline, one box per line.
    #[must_use]
    pub fn format_tree(&self, dom: &DomTree) -> String {
        let mut out = String::new();
        if let Some(root) = self.root() {
            self.write_box(dom, root, 0, &mut out);
        }
        out
    }

    fn write_box(&self, dom: &DomTree, id: BoxId, indent: usize, out: &mut String) {
        let b = &self[id];
        let prefix = "  ".repeat(indent);
        let label = match &b.box_type {
            BoxType::Document => "Document".to_string(),
            BoxType::Block => match dom.tag_name(b.node) {
                Some(tag) => format!("Block <{tag}>"),
                None => "Block #text".to_string(),
            },
            BoxType::Line => "Line".to_string(),
            BoxType::Text { word } => format!("Text {word:?}"),
            BoxType::Input => format!("Input <{}>", dom.tag_name(b.node).unwrap_or("?")),
        };
        let _ = writeln!(
            out,
            "{prefix}{label} x={} y={} w={} h={}",
            b.x, b.y, b.width, b.height
        );
        for &child in &b.children {
            self.write_box(dom, child, indent + 1, out);
        }
    }
}

impl Index<BoxId> for LayoutTree {
    type Output = LayoutBox;

    fn index(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }
}

impl IndexMut<BoxId> for LayoutTree {
    fn index_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }
}
