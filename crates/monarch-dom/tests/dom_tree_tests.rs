//! Tests for document tree construction, traversal and mutation.

use monarch_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to allocate an element and attach it under `parent`.
fn append_element(tree: &mut DomTree, parent: Option<NodeId>, tag: &str) -> NodeId {
    let id = tree.alloc(NodeType::Element(ElementData::new(tag)), parent);
    if let Some(parent) = parent {
        tree.append_child(parent, id);
    }
    id
}

fn append_text(tree: &mut DomTree, parent: NodeId, text: &str) -> NodeId {
    let id = tree.alloc(NodeType::Text(text.to_string()), Some(parent));
    tree.append_child(parent, id);
    id
}

#[test]
fn test_first_allocation_is_root() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    assert_eq!(html, NodeId::ROOT);
    assert_eq!(tree.root(), html);
    assert_eq!(tree.parent(html), None);
}

#[test]
fn test_alloc_does_not_attach() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let body = tree.alloc(NodeType::Element(ElementData::new("body")), Some(html));

    // Parent pointer is known, but the node is not yet owned by the parent.
    assert_eq!(tree.parent(body), Some(html));
    assert!(tree.children(html).is_empty());

    tree.append_child(html, body);
    assert_eq!(tree.children(html), &[body]);
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let body = append_element(&mut tree, Some(html), "body");
    let p = append_element(&mut tree, Some(body), "p");
    let text = append_text(&mut tree, p, "hi");

    let ancestors: Vec<NodeId> = tree.ancestors(text).collect();
    assert_eq!(ancestors, vec![p, body, html]);
    assert_eq!(tree.ancestors(html).count(), 0);
}

#[test]
fn test_descendants_are_in_document_order() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let head = append_element(&mut tree, Some(html), "head");
    let body = append_element(&mut tree, Some(html), "body");
    let p = append_element(&mut tree, Some(body), "p");
    let text = append_text(&mut tree, p, "x");
    let div = append_element(&mut tree, Some(body), "div");

    assert_eq!(tree.descendants(html), vec![html, head, body, p, text, div]);
    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.body(), Some(body));
}

#[test]
fn test_text_content_concatenates() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let p = append_element(&mut tree, Some(html), "p");
    let _ = append_text(&mut tree, p, "Hello ");
    let b = append_element(&mut tree, Some(p), "b");
    let _ = append_text(&mut tree, b, "World");

    assert_eq!(tree.text_content(p), "Hello World");
}

#[test]
fn test_remove_children_detaches() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let a = append_element(&mut tree, Some(html), "a");
    let b = append_element(&mut tree, Some(html), "b");

    let removed = tree.remove_children(html);
    assert_eq!(removed, vec![a, b]);
    assert!(tree.children(html).is_empty());
    assert_eq!(tree.parent(a), None);
    assert_eq!(tree.parent(b), None);
}

#[test]
fn test_import_subtree_copies_deeply() {
    let mut fragment = DomTree::new();
    let div = append_element(&mut fragment, None, "div");
    let span = append_element(&mut fragment, Some(div), "span");
    let _ = append_text(&mut fragment, span, "copied");

    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let copy = tree.import_subtree(&fragment, div, html);

    assert_eq!(tree.children(html), &[copy]);
    assert_eq!(tree.tag_name(copy), Some("div"));
    assert_eq!(tree.text_content(copy), "copied");
    let copied_span = tree.children(copy)[0];
    assert_eq!(tree.parent(copied_span), Some(copy));
}

#[test]
fn test_set_attribute_only_touches_elements() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, None, "html");
    let text = append_text(&mut tree, html, "t");

    tree.set_attribute(html, "lang", "en");
    tree.set_attribute(text, "lang", "en");

    assert_eq!(tree.attribute(html, "lang"), Some("en"));
    assert_eq!(tree.attribute(text, "lang"), None);
}
