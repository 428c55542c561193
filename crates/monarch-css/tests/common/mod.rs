//! Shared fixtures for the layout and paint tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::rc::Rc;

use monarch_css::layout::{FontCache, FontMetrics, FontProvider, LayoutConfig};
use monarch_css::{
    ComputedStyle, FontKey, LayoutContext, LayoutTree, StyleRule, compute_styles,
    default_stylesheet, layout_document, parse_stylesheet,
};
use monarch_dom::{DomTree, NodeId};
use monarch_html::parse_html;

/// Metrics with round numbers: ascent is the size, descent a quarter of
/// it, and every character half the size wide. At 16px a line space is 20
/// and a space is 8.
pub struct GridMetrics {
    size: f32,
}

impl FontMetrics for GridMetrics {
    fn ascent(&self) -> f32 {
        self.size
    }

    fn descent(&self) -> f32 {
        self.size / 4.0
    }

    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size / 2.0
    }
}

pub struct GridFonts;

impl FontProvider for GridFonts {
    fn load(&self, key: FontKey) -> Rc<dyn FontMetrics> {
        Rc::new(GridMetrics {
            size: key.size as f32,
        })
    }
}

/// A document run through parse, cascade and layout.
pub struct Rendered {
    pub dom: DomTree,
    pub styles: HashMap<NodeId, ComputedStyle>,
    pub fonts: FontCache,
    pub layout: LayoutTree,
}

/// Layout config with a line width of exactly `line_width`.
pub fn config(line_width: f32) -> LayoutConfig {
    let defaults = LayoutConfig::default();
    LayoutConfig {
        width: line_width + 2.0 * defaults.hstep,
        ..defaults
    }
}

pub fn rules(css: &str) -> Vec<StyleRule> {
    let mut rules = default_stylesheet().rules.clone();
    rules.extend(parse_stylesheet(css).rules);
    rules
}

pub fn render_with(html: &str, css: &str, config: LayoutConfig) -> Rendered {
    let dom = parse_html(html);
    let styles = compute_styles(&dom, &rules(css));
    let fonts = FontCache::new(Box::new(GridFonts));
    let layout = {
        let ctx = LayoutContext {
            dom: &dom,
            styles: &styles,
            fonts: &fonts,
            config,
        };
        layout_document(&ctx)
    };
    Rendered {
        dom,
        styles,
        fonts,
        layout,
    }
}

pub fn render(html: &str) -> Rendered {
    render_with(html, "", LayoutConfig::default())
}

pub fn find_element(dom: &DomTree, tag: &str) -> NodeId {
    dom.descendants(dom.root())
        .into_iter()
        .find(|&id| dom.tag_name(id) == Some(tag))
        .unwrap_or_else(|| panic!("no <{tag}> in document"))
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
