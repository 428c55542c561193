//! Monarch CLI
//!
//! A headless front end for inspecting each pipeline stage.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use monarch_browser::{BrowserConfig, Tab};
use monarch_common::Url;
use monarch_html::format_tree;
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};

#[derive(Parser, Debug)]
#[command(name = "monarch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print every stage for a local file
    monarch ./index.html

    # Box tree of a remote page in a narrow window
    monarch --layout --width 400 https://example.com

    # Draw commands after scrolling down five steps, as JSON
    monarch --paint --scroll 5 --json ./long.html

    # Parse inline HTML
    monarch --html '<p>Hello <b>World</b></p>'
"#)]
struct Cli {
    /// Path to HTML file or URL to open
    #[arg(value_name = "FILE|URL", conflicts_with = "html")]
    path: Option<String>,

    /// Parse HTML string directly instead of file/URL
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Window width (overrides the config file)
    #[arg(long)]
    width: Option<f32>,

    /// Window height (overrides the config file)
    #[arg(long)]
    height: Option<f32>,

    /// JSON file with browser settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Show the document tree
    #[arg(long)]
    dom: bool,

    /// Show resolved styles
    #[arg(long)]
    styles: bool,

    /// Show the box tree with geometry
    #[arg(long)]
    layout: bool,

    /// Show draw commands
    #[arg(long)]
    paint: bool,

    /// Scroll down this many steps before printing; only visible draw
    /// commands are shown
    #[arg(long, value_name = "N")]
    scroll: Option<u32>,

    /// Log pipeline stages
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// With no section flag, every section is shown.
    fn show_all(&self) -> bool {
        !(self.dom || self.styles || self.layout || self.paint)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = load_config(&cli)?;
    let mut tab = Tab::new(config);
    load_page(&cli, &mut tab)?;

    if let Some(steps) = cli.scroll {
        for _ in 0..steps {
            tab.scroll_down();
        }
    }

    if cli.json {
        print_json(&cli, &tab)?;
    } else {
        print_text(&cli, &tab)?;
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<BrowserConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => BrowserConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    Ok(config)
}

fn load_page(cli: &Cli, tab: &mut Tab) -> Result<()> {
    if let Some(html) = &cli.html {
        tab.load_html(html, None);
        return Ok(());
    }
    let Some(target) = &cli.path else {
        bail!("expected a file path, a URL, or --html");
    };
    let url = to_url(target)?;
    tab.load(&url)
        .with_context(|| format!("failed to load {url}"))
}

/// Accept either a URL or a local path.
fn to_url(target: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(target) {
        return Ok(url);
    }
    let path = Path::new(target)
        .canonicalize()
        .with_context(|| format!("no such file '{target}'"))?;
    Ok(Url::from_file_path(&path)?)
}

fn header(title: &str) {
    println!("{}", format!("=== {title} ===").bold().cyan());
}

fn print_text(cli: &Cli, tab: &Tab) -> Result<()> {
    let all = cli.show_all();
    let dom = tab.dom();

    if all || cli.dom {
        header("DOM Tree");
        print!("{}", format_tree(dom, dom.root()));
        println!();
    }

    if all || cli.styles {
        header("Computed Styles");
        for id in dom.descendants(dom.root()) {
            let Some(tag) = dom.tag_name(id) else {
                continue;
            };
            let Some(style) = tab.styles().get(&id) else {
                continue;
            };
            let properties: Vec<String> = style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            println!("{} {}", format!("<{tag}>").green(), properties.join("; "));
        }
        println!();
    }

    if all || cli.layout {
        header("Layout Tree");
        print!("{}", tab.layout().format_tree(dom));
        println!();
    }

    if all || cli.paint {
        header("Draw Commands");
        let commands = tab.visible_commands();
        for command in &commands {
            println!("{}", serde_json::to_string(command)?);
        }
        if let Some(thumb) = tab.scrollbar_command() {
            println!("{} {}", "scrollbar".dimmed(), serde_json::to_string(&thumb)?);
        }
        let state = tab.scroll_state();
        println!(
            "{}",
            format!(
                "{} of {} commands visible at offset {:.1} (step {:.1})",
                commands.len(),
                tab.display_list().len(),
                state.offset,
                state.step
            )
            .dimmed()
        );
    }
    Ok(())
}

fn print_json(cli: &Cli, tab: &Tab) -> Result<()> {
    let all = cli.show_all();
    let dom = tab.dom();
    let mut out = Map::new();

    if all || cli.dom {
        let _ = out.insert("dom".to_string(), json!(format_tree(dom, dom.root())));
    }
    if all || cli.styles {
        let mut styles = Map::new();
        for id in dom.descendants(dom.root()) {
            if let (Some(tag), Some(style)) = (dom.tag_name(id), tab.styles().get(&id)) {
                let _ = styles.insert(format!("{}:{tag}", id.0), serde_json::to_value(style)?);
            }
        }
        let _ = out.insert("styles".to_string(), Value::Object(styles));
    }
    if all || cli.layout {
        let _ = out.insert("layout".to_string(), json!(tab.layout().format_tree(dom)));
    }
    if all || cli.paint {
        let _ = out.insert(
            "paint".to_string(),
            serde_json::to_value(tab.visible_commands())?,
        );
        let _ = out.insert(
            "scrollbar".to_string(),
            serde_json::to_value(tab.scrollbar_command())?,
        );
        let _ = out.insert(
            "scroll".to_string(),
            serde_json::to_value(tab.scroll_state())?,
        );
    }

    println!("{}", serde_json::to_string_pretty(&Value::Object(out))?);
    Ok(())
}
