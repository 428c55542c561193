//! A single browser tab.
//!
//! Owns one document and everything derived from it. Any mutation (a load,
//! a resize, a form edit, a script-bridge write) re-runs cascade, layout,
//! paint and scroll measurement wholesale; nothing is updated
//! incrementally.

use std::collections::HashMap;

use monarch_common::warning::{clear_warnings, warn_once};
use monarch_common::{Fetch, NetFetcher, Url};
use monarch_css::{
    ComputedStyle, DisplayList, DrawCommand, FontCache, LayoutContext, LayoutTree, Painter,
    SelectorError, StyleRule, collect_rules, compute_styles, layout_document, parse_selector,
};
use monarch_dom::{DomTree, NodeId};
use monarch_html::parse_html;

use crate::LoadError;
use crate::config::BrowserConfig;
use crate::font_metrics::FontdueFonts;
use crate::scroll::{ScrollState, Scrollbar};

/// Result of a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing interactive was hit.
    Nothing,
    /// A link was followed to this URL.
    Navigated(Url),
    /// This input element took focus.
    Focused(NodeId),
}

/// A browser tab: a loaded document and its rendering.
pub struct Tab {
    config: BrowserConfig,
    fetcher: Box<dyn Fetch>,
    fonts: FontCache,
    url: Option<Url>,
    dom: DomTree,
    rules: Vec<StyleRule>,
    styles: HashMap<NodeId, ComputedStyle>,
    layout: LayoutTree,
    display_list: DisplayList,
    scrollbar: Scrollbar,
    focus: Option<NodeId>,
}

impl Tab {
    /// A tab fetching over the network and measuring text with system fonts.
    #[must_use]
    pub fn new(config: BrowserConfig) -> Self {
        let fonts = FontCache::new(Box::new(FontdueFonts::system()));
        Self::with_parts(config, Box::new(NetFetcher), fonts)
    }

    /// A tab over the given fetcher and font cache.
    #[must_use]
    pub fn with_parts(config: BrowserConfig, fetcher: Box<dyn Fetch>, fonts: FontCache) -> Self {
        let scrollbar = Self::measure(&config, 0.0);
        Self {
            config,
            fetcher,
            fonts,
            url: None,
            dom: DomTree::new(),
            rules: Vec::new(),
            styles: HashMap::new(),
            layout: LayoutTree::new(),
            display_list: DisplayList::new(),
            scrollbar,
            focus: None,
        }
    }

    /// Fetch `url` and show it, scrolled to the top.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] when the document itself cannot be
    /// retrieved. Stylesheets that fail to load are skipped with a warning.
    pub fn load(&mut self, url: &Url) -> Result<(), LoadError> {
        clear_warnings();
        log::debug!("loading {url}");
        let html = self.fetcher.fetch_text(url)?;
        self.load_html(&html, Some(url.clone()));
        Ok(())
    }

    /// Show `html`, resolving linked stylesheets and links against `base`.
    pub fn load_html(&mut self, html: &str, base: Option<Url>) {
        self.url = base;
        self.dom = parse_html(html);
        self.rules = collect_rules(&self.dom, self.url.as_ref(), self.fetcher.as_ref());
        self.focus = None;
        self.scrollbar = Self::measure(&self.config, 0.0);
        self.render();
    }

    /// Recompute styles, layout, paint and scroll geometry.
    pub fn render(&mut self) {
        self.styles = compute_styles(&self.dom, &self.rules);
        self.layout = {
            let ctx = LayoutContext {
                dom: &self.dom,
                styles: &self.styles,
                fonts: &self.fonts,
                config: self.config.layout_config(),
            };
            layout_document(&ctx)
        };
        self.display_list = Painter::new(&self.dom, &self.styles, &self.fonts)
            .with_focus(self.focus)
            .paint(&self.layout);
        self.scrollbar = self.scrollbar.remeasured(
            self.layout.document_height(),
            self.config.viewport_height(),
            self.config.width,
        );
    }

    /// Change the window size and re-render.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.width = width;
        self.config.height = height;
        self.render();
    }

    /// Handle a click at window coordinates.
    ///
    /// The deepest box under the point is found and its document ancestors
    /// are searched: a link with an `href` is followed, an `input` takes
    /// focus with its value cleared. Clicking anything else drops focus.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when a followed link cannot be resolved or
    /// fetched.
    pub fn click(&mut self, x: f32, y: f32) -> Result<ClickOutcome, LoadError> {
        let page_y = y + self.scrollbar.offset() - self.config.chrome_offset;
        let Some(hit) = self.layout.hit_test(x, page_y) else {
            return Ok(self.blur());
        };

        let node = self.layout[hit].node;
        let target = std::iter::once(node)
            .chain(self.dom.ancestors(node))
            .find(|&id| {
                matches!(self.dom.tag_name(id), Some("input"))
                    || (self.dom.tag_name(id) == Some("a")
                        && self.dom.attribute(id, "href").is_some())
            });

        match target {
            Some(id) if self.dom.tag_name(id) == Some("a") => {
                let href = self.dom.attribute(id, "href").unwrap_or_default();
                let url = match &self.url {
                    Some(base) => base.resolve(href)?,
                    None => Url::parse(href)?,
                };
                self.load(&url)?;
                Ok(ClickOutcome::Navigated(url))
            }
            Some(id) => {
                self.focus = Some(id);
                self.dom.set_attribute(id, "value", "");
                self.render();
                Ok(ClickOutcome::Focused(id))
            }
            None => Ok(self.blur()),
        }
    }

    fn blur(&mut self) -> ClickOutcome {
        if self.focus.take().is_some() {
            self.render();
        }
        ClickOutcome::Nothing
    }

    /// Type a character into the focused input. Returns whether anything
    /// had focus.
    pub fn keypress(&mut self, ch: char) -> bool {
        let Some(focus) = self.focus else {
            return false;
        };
        let mut value = self.dom.attribute(focus, "value").unwrap_or_default().to_string();
        value.push(ch);
        self.dom.set_attribute(focus, "value", &value);
        self.render();
        true
    }

    /// Scroll down one step.
    pub fn scroll_down(&mut self) {
        self.scrollbar.scroll_down();
    }

    /// Scroll up one step.
    pub fn scroll_up(&mut self) {
        self.scrollbar.scroll_up();
    }

    /// Commands that intersect the viewport at the current offset, in paint
    /// order. Coordinates are still page coordinates.
    #[must_use]
    pub fn visible_commands(&self) -> Vec<&DrawCommand> {
        let top = self.scrollbar.offset();
        let bottom = top + self.config.viewport_height();
        self.display_list
            .iter()
            .filter(|command| command.rect().overlaps_vertically(top, bottom))
            .collect()
    }

    /// The scrollbar thumb, if the page scrolls.
    #[must_use]
    pub fn scrollbar_command(&self) -> Option<DrawCommand> {
        self.scrollbar.paint()
    }

    /// Elements matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] when `selector` is not a tag or
    /// descendant selector.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(parse_selector(selector)?.select_all(&self.dom))
    }

    /// An attribute of an element.
    #[must_use]
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.dom.attribute(node, name)
    }

    /// Replace the children of `node` with the parsed `fragment` and
    /// re-render. Returns `false` when `node` is not an element.
    ///
    /// Replaced children are detached but stay in the arena until the next
    /// load, so ids held by a caller never point at a different node.
    pub fn set_inner_html(&mut self, node: NodeId, fragment: &str) -> bool {
        if self.dom.as_element(node).is_none() {
            warn_once("DOM", &format!("set_inner_html on non-element node {}", node.0));
            return false;
        }
        let parsed = parse_html(&format!("<html><body>{fragment}</body></html>"));
        let _ = self.dom.remove_children(node);
        if let Some(body) = parsed.body() {
            for &child in parsed.children(body) {
                let _ = self.dom.import_subtree(&parsed, child, node);
            }
        }
        if self.focus.is_some_and(|focus| !self.is_attached(focus)) {
            self.focus = None;
        }
        self.render();
        true
    }

    fn is_attached(&self, node: NodeId) -> bool {
        node == self.dom.root() || self.dom.ancestors(node).any(|id| id == self.dom.root())
    }

    fn measure(config: &BrowserConfig, content_height: f32) -> Scrollbar {
        Scrollbar::new(
            content_height,
            config.viewport_height(),
            config.vstep,
            config.chrome_offset,
            config.width,
            config.scrollbar_width,
        )
    }

    /// The current document URL.
    #[must_use]
    pub const fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// The current document.
    #[must_use]
    pub const fn dom(&self) -> &DomTree {
        &self.dom
    }

    /// Resolved styles of the current document.
    #[must_use]
    pub const fn styles(&self) -> &HashMap<NodeId, ComputedStyle> {
        &self.styles
    }

    /// The current box tree.
    #[must_use]
    pub const fn layout(&self) -> &LayoutTree {
        &self.layout
    }

    /// Every draw command of the page.
    #[must_use]
    pub const fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    /// Scroll position and thumb placement.
    #[must_use]
    pub const fn scroll_state(&self) -> ScrollState {
        self.scrollbar.state()
    }

    /// The focused input, if any.
    #[must_use]
    pub const fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    /// Current settings.
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }
}
