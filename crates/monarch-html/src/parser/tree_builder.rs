use std::fmt::Write as _;

use monarch_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::{Attribute, Token};

/// Elements that never have children and are attached immediately.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements that belong in `head` when they appear before any body content.
pub const HEAD_TAGS: &[&str] = &[
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

/// Upper bound on synthesized tags per incoming token. The longest chain is
/// `html`, `/head`, `body`; one spare iteration absorbs the final check.
const IMPLICIT_TAG_LIMIT: usize = 4;

/// A recovery the tree builder performed.
///
/// Parsing never fails; these are informational.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// What was recovered.
    pub message: String,
    /// Index into the token stream where the recovery happened.
    pub token_index: usize,
}

/// The token the implicit-tag loop is deciding about.
#[derive(Debug, Clone, Copy)]
enum Pending<'a> {
    Start(&'a str),
    End(&'a str),
    Text,
    Eof,
}

/// Builds a [`DomTree`] from tokens using a stack of unfinished elements.
///
/// Missing `html`, `head` and `body` elements are synthesized as needed so
/// that every document ends up rooted at an `html` element with a `head`
/// and a `body`.
pub struct HTMLParser {
    tokens: Vec<Token>,
    tree: DomTree,
    /// Elements opened but not yet closed. `unfinished[0]` is the root.
    unfinished: Vec<NodeId>,
    issues: Vec<ParseIssue>,
    token_index: usize,
}

impl HTMLParser {
    /// Create a parser over a token stream.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            tree: DomTree::new(),
            unfinished: Vec::new(),
            issues: Vec::new(),
            token_index: 0,
        }
    }

    /// Build the tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Build the tree, also returning the recoveries made along the way.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            self.token_index = index;
            match token {
                Token::Text(text) => self.add_text(text),
                Token::StartTag { name, attributes } => self.add_start_tag(&name, attributes),
                Token::EndTag { name } => self.add_end_tag(&name),
                Token::Declaration(_) => {}
            }
        }
        self.finish();
        (self.tree, self.issues)
    }

    fn add_text(&mut self, text: String) {
        if text.chars().all(char::is_whitespace) {
            return;
        }
        self.implicit_tags(Pending::Text);
        let Some(&parent) = self.unfinished.last() else {
            return;
        };
        let node = self.tree.alloc(NodeType::Text(text), Some(parent));
        self.tree.append_child(parent, node);
    }

    fn add_start_tag(&mut self, name: &str, attributes: Vec<Attribute>) {
        self.implicit_tags(Pending::Start(name));
        let attrs: AttributesMap = attributes
            .into_iter()
            .map(|attr| (attr.name, attr.value))
            .collect();

        if SELF_CLOSING_TAGS.contains(&name) {
            let Some(&parent) = self.unfinished.last() else {
                return;
            };
            let node = self.tree.alloc(element(name, attrs), Some(parent));
            self.tree.append_child(parent, node);
        } else {
            self.open_element(name, attrs);
        }
    }

    fn add_end_tag(&mut self, name: &str) {
        self.implicit_tags(Pending::End(name));
        if self.unfinished.len() <= 1 {
            self.issue(format!("ignored </{name}> with only the root open"));
            return;
        }
        self.close_current();
    }

    /// Push a new unfinished element. It is attached to its parent when closed.
    fn open_element(&mut self, name: &str, attrs: AttributesMap) {
        let parent = self.unfinished.last().copied();
        let node = self.tree.alloc(element(name, attrs), parent);
        self.unfinished.push(node);
    }

    /// Pop the current element and append it to the one below it.
    fn close_current(&mut self) {
        if self.unfinished.len() < 2 {
            return;
        }
        if let Some(node) = self.unfinished.pop()
            && let Some(&parent) = self.unfinished.last()
        {
            self.tree.append_child(parent, node);
        }
    }

    fn open_tag_names(&self) -> Vec<&str> {
        self.unfinished
            .iter()
            .filter_map(|&id| self.tree.tag_name(id))
            .collect()
    }

    /// Synthesize whatever `html`, `head`, `body` or `/head` tags must come
    /// before `pending` for the document skeleton to hold.
    fn implicit_tags(&mut self, pending: Pending<'_>) {
        for _ in 0..IMPLICIT_TAG_LIMIT {
            let open = self.open_tag_names();
            let is_head_tag =
                matches!(pending, Pending::Start(tag) if HEAD_TAGS.contains(&tag));

            if open.is_empty() && !matches!(pending, Pending::Start("html")) {
                self.issue("inserted implied <html>".to_string());
                self.open_element("html", AttributesMap::new());
            } else if open == ["html"]
                && !matches!(
                    pending,
                    Pending::Start("head" | "body") | Pending::End("html")
                )
            {
                if is_head_tag {
                    self.issue("inserted implied <head>".to_string());
                    self.open_element("head", AttributesMap::new());
                } else {
                    self.issue("inserted implied <body>".to_string());
                    self.open_element("body", AttributesMap::new());
                }
            } else if open == ["html", "head"]
                && !is_head_tag
                && !matches!(pending, Pending::End("head"))
            {
                self.issue("inserted implied </head>".to_string());
                self.close_current();
            } else {
                return;
            }
        }
    }

    /// Close everything still open and make sure `head` and `body` exist.
    fn finish(&mut self) {
        if self.unfinished.is_empty() {
            self.implicit_tags(Pending::Eof);
        }
        while self.unfinished.len() > 1 {
            self.close_current();
        }
        self.complete_skeleton();
    }

    fn complete_skeleton(&mut self) {
        let root = self.tree.root();
        if self.tree.head().is_none() {
            self.issue("inserted missing <head>".to_string());
            let head = self.tree.alloc(element("head", AttributesMap::new()), Some(root));
            self.tree.prepend_child(root, head);
        }
        if self.tree.body().is_none() {
            self.issue("inserted missing <body>".to_string());
            let body = self.tree.alloc(element("body", AttributesMap::new()), Some(root));
            self.tree.append_child(root, body);
        }
    }

    fn issue(&mut self, message: String) {
        log::trace!("parse recovery at token {}: {message}", self.token_index);
        self.issues.push(ParseIssue {
            message,
            token_index: self.token_index,
        });
    }
}

fn element(name: &str, attrs: AttributesMap) -> NodeType {
    NodeType::Element(ElementData {
        tag_name: name.to_string(),
        attrs,
    })
}

/// Render the subtree at `id` as an indented outline, one node per line.
///
/// Elements print as `<tag attr="value">` with attributes sorted by name;
/// text nodes print as quoted strings.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Element(data) => {
            let mut attrs: Vec<_> = data.attrs.iter().collect();
            attrs.sort();
            let _ = write!(out, "{prefix}<{}", data.tag_name);
            for (key, value) in attrs {
                if value.is_empty() {
                    let _ = write!(out, " {key}");
                } else {
                    let _ = write!(out, " {key}=\"{value}\"");
                }
            }
            out.push_str(">\n");
        }
        NodeType::Text(text) => {
            let _ = writeln!(out, "{prefix}{text:?}");
        }
    }
    for &child in &node.children {
        write_node(tree, child, indent + 1, out);
    }
}
