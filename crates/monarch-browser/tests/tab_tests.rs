//! Integration tests for the tab: loading, interaction, scrolling and the
//! script bridge.

use std::collections::HashMap;

use monarch_browser::css::{BoxType, DrawCommand, FontCache};
use monarch_browser::{BrowserConfig, ClickOutcome, LoadError, Tab};
use monarch_common::{Fetch, FetchError, Url};
use monarch_dom::NodeId;

struct MemoryFetch {
    files: HashMap<String, String>,
}

impl Fetch for MemoryFetch {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.files
            .get(url.as_str())
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}

fn site(files: &[(&str, &str)]) -> Tab {
    let fetcher = MemoryFetch {
        files: files
            .iter()
            .map(|(path, body)| (format!("http://example.org/{path}"), (*body).to_string()))
            .collect(),
    };
    Tab::with_parts(
        BrowserConfig::default(),
        Box::new(fetcher),
        FontCache::approximate(),
    )
}

fn url(path: &str) -> Url {
    Url::parse(&format!("http://example.org/{path}")).unwrap()
}

fn texts(tab: &Tab) -> Vec<String> {
    tab.display_list()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Window coordinates of the center of the first box for `node`.
fn center_of(tab: &Tab, node: NodeId) -> (f32, f32) {
    let layout = tab.layout();
    let id = layout
        .preorder()
        .into_iter()
        .find(|&id| layout[id].node == node && layout[id].box_type != BoxType::Block)
        .unwrap();
    let rect = layout[id].rect();
    let scroll = tab.scroll_state().offset;
    (
        (rect.left + rect.right) / 2.0,
        (rect.top + rect.bottom) / 2.0 - scroll,
    )
}

fn first_text_child(tab: &Tab, tag: &str) -> NodeId {
    let element = tab.query_selector_all(tag).unwrap()[0];
    tab.dom().children(element)[0]
}

#[test]
fn test_load_applies_linked_stylesheet() {
    let mut tab = site(&[
        (
            "index.html",
            "<head><link rel=stylesheet href=style.css></head><p>Hi</p>",
        ),
        ("style.css", "p { color: red }"),
    ]);
    tab.load(&url("index.html")).unwrap();

    assert_eq!(texts(&tab), vec!["Hi"]);
    let colors: Vec<_> = tab
        .display_list()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { color, .. } => Some(color.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(colors, vec!["red"]);
    assert_eq!(tab.url(), Some(&url("index.html")));
}

#[test]
fn test_missing_stylesheet_is_skipped() {
    let mut tab = site(&[(
        "index.html",
        "<head><link rel=stylesheet href=gone.css></head><p>Hi</p>",
    )]);
    tab.load(&url("index.html")).unwrap();
    assert_eq!(texts(&tab), vec!["Hi"]);
}

#[test]
fn test_missing_document_is_an_error() {
    let mut tab = site(&[]);
    let err = tab.load(&url("nowhere.html")).unwrap_err();
    assert!(matches!(err, LoadError::Fetch(FetchError::NotFound(_))));
}

#[test]
fn test_click_link_navigates() {
    let mut tab = site(&[
        ("dir/index.html", "<p>see <a href=../next.html>next</a></p>"),
        ("next.html", "<p>arrived</p>"),
    ]);
    tab.load(&url("dir/index.html")).unwrap();

    let (x, y) = center_of(&tab, first_text_child(&tab, "a"));
    let outcome = tab.click(x, y).unwrap();
    assert_eq!(outcome, ClickOutcome::Navigated(url("next.html")));
    assert_eq!(texts(&tab), vec!["arrived"]);
}

#[test]
fn test_broken_link_reports_error() {
    let mut tab = site(&[("index.html", "<a href=missing.html>x</a>")]);
    tab.load(&url("index.html")).unwrap();
    let (x, y) = center_of(&tab, first_text_child(&tab, "a"));
    assert!(matches!(tab.click(x, y), Err(LoadError::Fetch(_))));
}

#[test]
fn test_click_input_focuses_and_typing_appends() {
    let mut tab = site(&[]);
    tab.load_html("<p>Name <input value=old></p>", None);
    let input = tab.query_selector_all("input").unwrap()[0];

    let (x, y) = center_of(&tab, input);
    assert_eq!(tab.click(x, y).unwrap(), ClickOutcome::Focused(input));
    assert_eq!(tab.focus(), Some(input));
    assert_eq!(tab.get_attribute(input, "value"), Some(""));

    assert!(tab.keypress('o'));
    assert!(tab.keypress('k'));
    assert_eq!(tab.get_attribute(input, "value"), Some("ok"));
    assert!(texts(&tab).contains(&"ok".to_string()));
    assert!(
        tab.display_list()
            .iter()
            .any(|command| matches!(command, DrawCommand::Line { .. }))
    );
}

#[test]
fn test_click_elsewhere_drops_focus() {
    let mut tab = site(&[]);
    tab.load_html("<p><input value=a></p>", None);
    let input = tab.query_selector_all("input").unwrap()[0];
    let (x, y) = center_of(&tab, input);
    let _ = tab.click(x, y).unwrap();

    assert_eq!(tab.click(790.0, 590.0).unwrap(), ClickOutcome::Nothing);
    assert_eq!(tab.focus(), None);
    assert!(!tab.keypress('x'));
}

#[test]
fn test_long_page_scrolls() {
    let body: String = (0..80).map(|i| format!("<p>line {i}</p>")).collect();
    let mut tab = site(&[]);
    tab.load_html(&body, None);

    let all = tab.display_list().len();
    let visible = tab.visible_commands().len();
    assert!(visible < all);
    assert!(tab.scrollbar_command().is_some());

    tab.scroll_up();
    assert!(tab.scroll_state().offset.abs() < f32::EPSILON);

    tab.scroll_down();
    let state = tab.scroll_state();
    assert!(state.offset > 0.0);
    assert!(state.offset <= 30.0);
    assert!(state.thumb_top > 0.0);

    for _ in 0..1000 {
        tab.scroll_down();
    }
    let bottom = tab.scroll_state().offset;
    tab.scroll_down();
    assert!((tab.scroll_state().offset - bottom).abs() < f32::EPSILON);
    let last = tab.display_list().commands().last().unwrap();
    assert!(
        tab.visible_commands()
            .iter()
            .any(|command| std::ptr::eq(*command, last))
    );
}

#[test]
fn test_short_page_has_no_scrollbar() {
    let mut tab = site(&[]);
    tab.load_html("<p>short</p>", None);
    assert!(tab.scrollbar_command().is_none());
    tab.scroll_down();
    assert!(tab.scroll_state().offset.abs() < f32::EPSILON);
}

#[test]
fn test_huge_font_page_still_scrolls() {
    let mut tab = site(&[]);
    tab.load_html(r#"<p style="font-size:400000000px">x</p>"#, None);
    let step = tab.scroll_state().step;
    assert!(step > 0.0 && step <= 30.0 + 1e-3);
    tab.scroll_down();
    assert!(tab.scroll_state().offset > 0.0);
}

#[test]
fn test_resize_rewraps_lines() {
    let words = "word ".repeat(60);
    let mut tab = site(&[]);
    tab.load_html(&format!("<p>{words}</p>"), None);
    let lines = |tab: &Tab| {
        let layout = tab.layout();
        layout
            .preorder()
            .into_iter()
            .filter(|&id| layout[id].box_type == BoxType::Line)
            .count()
    };
    let wide = lines(&tab);
    tab.resize(300.0, 600.0);
    assert!(lines(&tab) > wide);
    assert!((tab.config().width - 300.0).abs() < f32::EPSILON);
}

#[test]
fn test_script_bridge_queries() {
    let mut tab = site(&[]);
    tab.load_html(
        "<div><a href=one>1</a></div><a href=two>2</a><div><p><a href=three>3</a></p></div>",
        None,
    );
    let links = tab.query_selector_all("div a").unwrap();
    let hrefs: Vec<_> = links
        .iter()
        .map(|&id| tab.get_attribute(id, "href").unwrap())
        .collect();
    assert_eq!(hrefs, vec!["one", "three"]);
    assert!(tab.query_selector_all("div > a").is_err());
}

#[test]
fn test_set_inner_html_rerenders() {
    let mut tab = site(&[]);
    tab.load_html("<div id=target><p>old</p></div>", None);
    let div = tab.query_selector_all("div").unwrap()[0];

    assert!(tab.set_inner_html(div, "<p>new <b>text</b></p>"));
    assert_eq!(texts(&tab), vec!["new", "text"]);
    assert_eq!(tab.query_selector_all("div b").unwrap().len(), 1);

    let text = first_text_child(&tab, "p");
    assert!(!tab.set_inner_html(text, "<p>x</p>"));
}

#[test]
fn test_replaced_nodes_stay_addressable_until_reload() {
    let mut tab = site(&[]);
    let html = "<div><p>old</p></div>";
    tab.load_html(html, None);
    let fresh_len = tab.dom().len();
    let div = tab.query_selector_all("div").unwrap()[0];
    let old_p = tab.query_selector_all("p").unwrap()[0];

    assert!(tab.set_inner_html(div, "<p>new</p>"));
    assert_eq!(tab.dom().tag_name(old_p), Some("p"));
    assert!(!tab.query_selector_all("p").unwrap().contains(&old_p));
    assert!(tab.dom().len() > fresh_len);

    tab.load_html(html, None);
    assert_eq!(tab.dom().len(), fresh_len);
}
