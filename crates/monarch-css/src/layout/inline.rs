//! Line breaking.
//!
//! Walks the subtree of a block in inline mode depth-first and distributes
//! its words and replaced elements over Line boxes. Only the box structure
//! and horizontal fit are decided here; line and word geometry is computed
//! afterwards in `formatting_context`.

use monarch_dom::{NodeId, NodeType};

use super::formatting_context::{LayoutContext, is_excluded};
use super::layout_box::{BoxId, BoxType, LayoutTree};
use super::{BLOCK_ELEMENTS, REPLACED_ELEMENTS};

/// State of one line-breaking walk.
pub(crate) struct InlineLayout<'c, 'a, 't> {
    ctx: &'c LayoutContext<'a>,
    tree: &'t mut LayoutTree,
    block: BoxId,
    line: BoxId,
    cursor_x: f32,
    pending_gap: f32,
}

impl<'c, 'a, 't> InlineLayout<'c, 'a, 't> {
    /// Start a walk for `block`, opening its first line.
    pub(crate) fn new(ctx: &'c LayoutContext<'a>, tree: &'t mut LayoutTree, block: BoxId) -> Self {
        let node = tree[block].node;
        let line = tree.push(BoxType::Line, node, Some(block), None);
        Self {
            ctx,
            tree,
            block,
            line,
            cursor_x: 0.0,
            pending_gap: 0.0,
        }
    }

    /// Walk `node` and return the paragraph spacing left over after the last
    /// line.
    pub(crate) fn run(mut self, node: NodeId) -> f32 {
        self.recurse(node);
        self.pending_gap
    }

    fn recurse(&mut self, node: NodeId) {
        let dom = self.ctx.dom;
        let Some(n) = dom.get(node) else {
            return;
        };
        match &n.node_type {
            NodeType::Text(text) => {
                for word in text.split_whitespace() {
                    self.word(node, word);
                }
            }
            NodeType::Element(data) => {
                let tag = data.tag_name.as_str();
                if is_excluded(dom, node) {
                    return;
                }
                if tag == "br" {
                    let gap = std::mem::take(&mut self.pending_gap);
                    self.new_line(gap);
                    return;
                }
                if REPLACED_ELEMENTS.contains(&tag) {
                    self.input(node);
                    return;
                }
                for &child in dom.children(node) {
                    self.recurse(child);
                }
                if BLOCK_ELEMENTS.contains(&tag) {
                    self.pending_gap += self.ctx.config.vstep;
                }
            }
        }
    }

    fn new_line(&mut self, gap_before: f32) {
        let node = self.tree[self.block].node;
        let previous = Some(self.line);
        self.line = self.tree.push(BoxType::Line, node, Some(self.block), previous);
        self.tree[self.line].gap_before = gap_before;
        self.cursor_x = 0.0;
    }

    /// Apply paragraph spacing accumulated since the last item. On an empty
    /// line the gap moves the line down; otherwise it opens a new one.
    fn flush_gap(&mut self) {
        let gap = std::mem::take(&mut self.pending_gap);
        if gap <= 0.0 {
            return;
        }
        if self.tree[self.line].children.is_empty() {
            self.tree[self.line].gap_before += gap;
        } else {
            self.new_line(gap);
        }
    }

    fn word(&mut self, node: NodeId, word: &str) {
        let width = self.ctx.font(self.ctx.font_key(node)).measure(word);
        self.place(
            node,
            BoxType::Text {
                word: word.to_string(),
            },
            width,
        );
    }

    fn input(&mut self, node: NodeId) {
        self.place(node, BoxType::Input, self.ctx.config.input_width);
    }

    /// Append an item of `width` to the current line, breaking first if it
    /// would overflow. An item wider than the whole line still goes on the
    /// current line when that line is empty.
    fn place(&mut self, node: NodeId, box_type: BoxType, width: f32) {
        self.flush_gap();
        let key = self.ctx.font_key(node);
        let space = self.ctx.font(key).measure(" ");

        let line_width = self.tree[self.block].width;
        if self.cursor_x + width > line_width && !self.tree[self.line].children.is_empty() {
            self.new_line(0.0);
        }

        let previous = self.tree[self.line].children.last().copied();
        let id = self.tree.push(box_type, node, Some(self.line), previous);
        self.tree[id].font = Some(key);
        self.cursor_x += width + space;
    }
}
