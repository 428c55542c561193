//! Style cascade.
//!
//! Rules come from the default stylesheet and every linked stylesheet, are
//! stably sorted by selector priority, and applied in that order. A node's
//! inline `style` attribute is applied last, so it always wins.
//!
//! Styles are resolved top-down: a node's style, including percentage
//! font-size rewriting, is complete before any child's computation starts.

use std::collections::HashMap;

use monarch_common::warning::warn_once;
use monarch_common::{Fetch, Url};
use monarch_dom::{DomTree, NodeId};

use crate::parser::{CSSParser, StyleRule, parse_inline_style};
use crate::style::{ComputedStyle, DEFAULT_FONT_SIZE_PX};
use crate::ua_stylesheet::default_stylesheet;

/// `href` values of `<link rel=stylesheet href=...>` elements, in document
/// order.
#[must_use]
pub fn linked_stylesheets(tree: &DomTree) -> Vec<String> {
    if tree.is_empty() {
        return Vec::new();
    }
    tree.descendants(tree.root())
        .into_iter()
        .filter(|&id| tree.tag_name(id) == Some("link"))
        .filter(|&id| {
            tree.attribute(id, "rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("stylesheet"))
            })
        })
        .filter_map(|id| tree.attribute(id, "href"))
        .map(str::to_string)
        .collect()
}

/// Gather the default rules followed by the rules of every linked
/// stylesheet, in document order.
///
/// Relative links resolve against `base`. A sheet that cannot be resolved or
/// fetched is skipped with a warning.
pub fn collect_rules(tree: &DomTree, base: Option<&Url>, fetcher: &dyn Fetch) -> Vec<StyleRule> {
    let mut rules = default_stylesheet().rules.clone();

    for href in linked_stylesheets(tree) {
        let url = match base {
            Some(base) => base.resolve(&href),
            None => Url::parse(&href),
        };
        let url = match url {
            Ok(url) => url,
            Err(err) => {
                warn_once("CSS", &format!("skipping stylesheet '{href}': {err}"));
                continue;
            }
        };
        match fetcher.fetch_text(&url) {
            Ok(css) => {
                let sheet = CSSParser::new(&css).parse_stylesheet();
                log::debug!("loaded {} rules from {url}", sheet.rules.len());
                rules.extend(sheet.rules);
            }
            Err(err) => warn_once("CSS", &format!("skipping stylesheet {url}: {err}")),
        }
    }
    rules
}

/// Compute the style of every node reachable from the root.
///
/// `rules` may be in any order; they are stably sorted by priority here, so
/// equal-priority rules keep their source order and the later one wins.
#[must_use]
pub fn compute_styles(tree: &DomTree, rules: &[StyleRule]) -> HashMap<NodeId, ComputedStyle> {
    let mut sorted: Vec<&StyleRule> = rules.iter().collect();
    sorted.sort_by_key(|rule| rule.selector.priority());

    let mut styles = HashMap::new();
    if tree.is_empty() {
        return styles;
    }
    // Pre-order guarantees a parent is resolved before its children.
    for id in tree.descendants(tree.root()) {
        let style = compute_node_style(tree, id, &sorted, &styles);
        let _ = styles.insert(id, style);
    }
    styles
}

fn compute_node_style(
    tree: &DomTree,
    id: NodeId,
    rules: &[&StyleRule],
    styles: &HashMap<NodeId, ComputedStyle>,
) -> ComputedStyle {
    let parent_style = tree.parent(id).and_then(|parent| styles.get(&parent));
    let mut style = parent_style.map_or_else(ComputedStyle::root, ComputedStyle::inherit_from);

    for rule in rules.iter().filter(|rule| rule.selector.matches(tree, id)) {
        for declaration in &rule.declarations {
            style.apply_declaration(declaration);
        }
    }

    if let Some(inline) = tree.attribute(id, "style") {
        for declaration in parse_inline_style(inline) {
            style.apply_declaration(&declaration);
        }
    }

    let parent_px = parent_style.map_or(DEFAULT_FONT_SIZE_PX, ComputedStyle::font_size_px);
    style.resolve_percentage_font_size(parent_px);
    style
}
