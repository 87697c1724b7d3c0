//! The `<model-tree>` component.
//!
//! # Scope
//!
//! This crate provides:
//! - **Loader** - fetches the document behind `src` and parses it
//! - **Renderer** - builds the toolbar and nested lists once, then only
//!   toggles the `collapsed` class
//! - **Tooltip controller** - one floating tooltip per instance, placed
//!   above (or below) the hovered target and clamped to the viewport
//! - **Lifecycle** - connect / disconnect with liveness tickets for
//!   in-flight loads
//!
//! # Example
//!
//! ```
//! use naming_tree_widget::{LoadOutcome, Page, StaticFetcher, TreeConfig};
//!
//! let fetcher = StaticFetcher::new().with("tree.yaml", "- {name: A, children: [{name: B}]}");
//! let mut page = Page::default();
//! let mut tree = page.create_model_tree(Some("tree.yaml"), TreeConfig::default());
//! assert_eq!(page.insert(&mut tree, &fetcher), LoadOutcome::Rendered);
//! ```

pub mod component;
pub mod config;
pub mod loader;
pub mod page;
pub mod renderer;
pub mod tooltip;

pub use component::{LoadOutcome, LoadTicket, ModelTree};
pub use config::{ConfigError, TooltipConfig, TreeConfig};
pub use loader::{Fetcher, LoadError, NetFetcher, StaticFetcher, load_forest};
pub use page::Page;
pub use renderer::RenderedTree;
pub use tooltip::{Position, TooltipController, TooltipState};
