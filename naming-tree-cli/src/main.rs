//! naming-tree CLI
//!
//! Loads a document through the same `<model-tree>` lifecycle a host page
//! uses and prints the result.
//!
//! - naming-tree tree.yaml                  # Rendered HTML
//! - naming-tree -f outline tree.yaml       # DOM outline
//! - naming-tree -f stats https://host/t.yaml

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use naming_tree_common::diagnostics::clear_warnings;
use naming_tree_dom::{outer_html, print_tree};
use naming_tree_widget::{LoadOutcome, ModelTree, NetFetcher, Page, TreeConfig};
use owo_colors::OwoColorize;

/// naming-tree: render a YAML naming taxonomy as a collapsible tree
#[derive(Parser, Debug)]
#[command(name = "naming-tree")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the rendered HTML
    naming-tree ./tree.yaml

    # Resolve a relative source against a base URL
    naming-tree --base https://example.com/trees/ data/tree.yaml

    # Everything collapsed, as an outline
    naming-tree --collapse-all -f outline ./tree.yaml

    # Parsed model as JSON
    naming-tree -f json ./tree.yaml
"#)]
struct Cli {
    /// Document to load: path, file:, data: or http(s) URL
    #[arg(value_name = "SRC")]
    src: String,

    /// Base URL for a relative SRC
    #[arg(long, value_name = "URL")]
    base: Option<String>,

    /// YAML file with presentation settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Toolbar title
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Expand every node before printing
    #[arg(long, conflicts_with = "collapse_all")]
    expand_all: bool,

    /// Collapse every non-root node before printing
    #[arg(long)]
    collapse_all: bool,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,
}

/// Output views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `outerHTML` of the host element
    Html,
    /// Indented DOM outline
    Outline,
    /// The parsed model
    Json,
    /// Node counts
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    clear_warnings();
    let mut page = Page::default();
    let mut tree = page.create_model_tree(Some(&cli.src), config);
    match page.insert(&mut tree, &NetFetcher) {
        LoadOutcome::Rendered => {}
        LoadOutcome::Idle | LoadOutcome::Failed | LoadOutcome::Discarded => {
            anyhow::bail!("could not load {}", cli.src);
        }
    }

    if cli.expand_all {
        tree.expand_all(&mut page.dom);
    } else if cli.collapse_all {
        tree.collapse_all(&mut page.dom);
    }

    print_view(&page, &tree, cli.format)
}

/// Settings file first, then flags on top.
fn build_config(cli: &Cli) -> anyhow::Result<TreeConfig> {
    let mut config = match &cli.config {
        Some(path) => TreeConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TreeConfig::default(),
    };
    if let Some(base) = &cli.base {
        config.base_url = Some(base.clone());
    }
    if let Some(title) = &cli.title {
        config.title.clone_from(title);
    }
    Ok(config)
}

fn print_view(page: &Page, tree: &ModelTree, format: Format) -> anyhow::Result<()> {
    let forest = tree.forest().context("no document was rendered")?;
    match format {
        Format::Html => println!("{}", outer_html(&page.dom, tree.host())),
        Format::Outline => print!("{}", print_tree(&page.dom, tree.host())),
        Format::Json => println!("{}", serde_json::to_string_pretty(forest)?),
        Format::Stats => {
            println!("{}", "=== Stats ===".bold());
            println!("{}", forest.stats());
        }
    }

    for issue in tree.issues() {
        eprintln!("{}", issue.to_string().dimmed());
    }
    Ok(())
}
