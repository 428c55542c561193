//! Document tree for the Monarch renderer.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! Every node exclusively owns its ordered child list; the `parent` field is a
//! non-owning lookup used only for ancestor queries (selector matching, style
//! inheritance, hit-test ancestor walks). It never participates in teardown:
//! dropping the [`DomTree`] drops the arena in one go.
//!
//! The root of a parsed document is always the `html` element at
//! [`NodeId::ROOT`]; the parser allocates it before anything else.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document root (`html` element) is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Element or text payload.
    pub node_type: NodeType,

    /// Non-owning back-reference to the parent, `None` for the root and for
    /// detached nodes.
    pub parent: Option<NodeId>,

    /// Owned children in document order.
    pub children: Vec<NodeId>,
}

/// The two kinds of document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// A tagged element with attributes.
    Element(ElementData),
    /// A run of character data.
    Text(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Case-folded tag name.
    pub tag_name: String,
    /// Case-folded attribute names mapped to their values.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: AttributesMap::new(),
        }
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Arena-based document tree.
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create an empty tree. The first allocated node becomes the root.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// The root node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes ever allocated (detached nodes included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node whose parent is `parent`.
    ///
    /// The node is *not* added to the parent's child list; the tree builder
    /// appends it once the element is finished.
    pub fn alloc(&mut self, node_type: NodeType, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent` and points its parent
    /// reference at `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Inserts `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.insert(0, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Detach every child of `parent`, returning the detached ids.
    ///
    /// Detached nodes stay in the arena but are unreachable from the root.
    pub fn remove_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for &child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    /// Deep-copy the subtree rooted at `source_id` in `source` and append the
    /// copy under `parent` in this tree. Returns the id of the copied root.
    pub fn import_subtree(&mut self, source: &DomTree, source_id: NodeId, parent: NodeId) -> NodeId {
        let node_type = source
            .get(source_id)
            .map_or_else(|| NodeType::Text(String::new()), |n| n.node_type.clone());
        let copy = self.alloc(node_type, Some(parent));
        self.append_child(parent, copy);
        for &child in source.children(source_id) {
            let _ = self.import_subtree(source, child, copy);
        }
        copy
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all strict ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// All nodes of the subtree rooted at `id`, in document (pre-)order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.get(id).is_none() {
            return out;
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Element(_) => None,
        })
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// Look up an attribute on an element node.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.attr(name))
    }

    /// Set (or overwrite) an attribute on an element node. Text nodes are
    /// left untouched.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(Node {
            node_type: NodeType::Element(data),
            ..
        }) = self.nodes.get_mut(id.0)
        {
            let _ = data.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// First direct child element of `id` with the given tag.
    #[must_use]
    pub fn child_element(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.tag_name(child) == Some(tag))
    }

    /// The `head` element of the document.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.child_element(self.root(), "head")
    }

    /// The `body` element of the document.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.child_element(self.root(), "body")
    }

    /// Concatenated text of all text nodes under `id`.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|node| self.as_text(node))
            .collect()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
