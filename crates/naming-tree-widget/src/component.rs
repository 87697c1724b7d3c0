//! The `<model-tree>` element and its lifecycle.
//!
//! A [`ModelTree`] is bound to one host element. Connecting it acquires the
//! tooltip and, the first time, hands out a [`LoadTicket`] for the host's
//! `src`. The host fetches however it likes and passes the result back to
//! [`ModelTree::complete_load`]. Disconnecting releases the tooltip and
//! invalidates every outstanding ticket, so a fetch that finishes after the
//! element left the page never renders.
//!
//! [`ModelTree::connect`] runs the whole sequence synchronously with a
//! [`Fetcher`].

use naming_tree_common::diagnostics::Diagnostic;
use naming_tree_common::net::FetchError;
use naming_tree_common::url::resolve_url;
use naming_tree_data::{Forest, parse_document};
use naming_tree_dom::{DomTree, NodeId};

use crate::config::TreeConfig;
use crate::loader::{Fetcher, LoadError};
use crate::renderer::{self, RenderedTree};
use crate::tooltip::{TooltipController, TooltipState};

/// Tag name of the element, also used as the diagnostics component.
pub const TAG_NAME: &str = "model-tree";

/// Attribute naming the document to load.
pub const SRC_ATTRIBUTE: &str = "src";

/// Permission to render the result of one fetch.
///
/// Only the newest ticket of a connected component is honored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    src: String,
}

impl LoadTicket {
    /// The resolved source to fetch.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }
}

/// What became of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing to load: no `src`, or already rendered.
    Idle,
    /// The tree was built and appended to the host.
    Rendered,
    /// Fetching or parsing failed; the host stays empty.
    Failed,
    /// The result arrived for a ticket that is no longer live.
    Discarded,
}

/// One `<model-tree>` instance.
#[derive(Debug)]
pub struct ModelTree {
    host: NodeId,
    config: TreeConfig,
    tooltip: Option<TooltipController>,
    /// Tooltip element kept across disconnects.
    spare_tooltip: Option<NodeId>,
    forest: Option<Forest>,
    rendered: Option<RenderedTree>,
    generation: u64,
    connected: bool,
    issues: Vec<Diagnostic>,
}

impl ModelTree {
    /// Bind a component to `host`. Nothing happens until it is connected.
    #[must_use]
    pub const fn new(host: NodeId, config: TreeConfig) -> Self {
        Self {
            host,
            config,
            tooltip: None,
            spare_tooltip: None,
            forest: None,
            rendered: None,
            generation: 0,
            connected: false,
            issues: Vec::new(),
        }
    }

    /// Called when the host enters the document.
    ///
    /// Attaches the tooltip. Returns a ticket when there is a document to
    /// load, which is only the case before the first successful render.
    /// A missing or blank `src` is noted in [`Self::issues`] and otherwise
    /// ignored.
    pub fn connected_callback(&mut self, dom: &mut DomTree) -> Option<LoadTicket> {
        if self.connected {
            return None;
        }
        self.connected = true;
        let tooltip = match self.spare_tooltip.take() {
            Some(element) => TooltipController::reattach(dom, element, self.host, &self.config.tooltip),
            None => TooltipController::attach(dom, self.host, &self.config.tooltip),
        };
        self.tooltip = Some(tooltip);

        if self.rendered.is_some() {
            return None;
        }

        let src = match dom.get_attribute(self.host, SRC_ATTRIBUTE) {
            Some(src) if !src.trim().is_empty() => src.trim().to_string(),
            _ => {
                self.issues
                    .push(Diagnostic::warning(TAG_NAME, "no src attribute; nothing to load"));
                return None;
            }
        };

        Some(LoadTicket {
            generation: self.generation,
            src: resolve_url(&src, self.config.base_url.as_deref()),
        })
    }

    /// Hand back the fetched text (or the fetch error) for `ticket`.
    ///
    /// A stale ticket is discarded. A failure is logged, recorded in
    /// [`Self::issues`], and leaves the host empty.
    pub fn complete_load(
        &mut self,
        dom: &mut DomTree,
        ticket: &LoadTicket,
        result: Result<String, FetchError>,
    ) -> LoadOutcome {
        if !self.connected || ticket.generation != self.generation || self.rendered.is_some() {
            self.report(Diagnostic::warning(
                TAG_NAME,
                format!("discarding stale result for {}", ticket.src),
            ));
            return LoadOutcome::Discarded;
        }

        let parsed = result
            .map_err(LoadError::from)
            .and_then(|text| parse_document(&text).map_err(LoadError::from));

        match parsed {
            Ok(mut forest) => {
                let rendered = renderer::render(dom, self.host, &mut forest, &self.config);
                self.forest = Some(forest);
                self.rendered = Some(rendered);
                LoadOutcome::Rendered
            }
            Err(err) => {
                self.report(Diagnostic::error(
                    TAG_NAME,
                    format!("failed to load {}: {err}", ticket.src),
                ));
                LoadOutcome::Failed
            }
        }
    }

    /// Connect and, if there is something to load, load it with `fetcher`.
    pub fn connect(&mut self, dom: &mut DomTree, fetcher: &dyn Fetcher) -> LoadOutcome {
        let Some(ticket) = self.connected_callback(dom) else {
            return LoadOutcome::Idle;
        };
        let result = fetcher.fetch_text(ticket.src());
        self.complete_load(dom, &ticket, result)
    }

    /// Called when the host leaves the document.
    ///
    /// Releases the tooltip element and its listeners and invalidates
    /// outstanding tickets. The rendered tree stays under the host.
    pub fn disconnected_callback(&mut self, dom: &mut DomTree) {
        if !self.connected {
            return;
        }
        self.connected = false;
        self.generation += 1;
        if let Some(tooltip) = self.tooltip.take() {
            self.spare_tooltip = Some(tooltip.detach(dom));
        }
    }

    /// Expand every node. Does nothing before rendering.
    pub fn expand_all(&self, dom: &mut DomTree) {
        if let Some(rendered) = &self.rendered {
            renderer::expand_all(dom, rendered.outer);
        }
    }

    /// Collapse every non-root node that has children. Does nothing before
    /// rendering.
    pub fn collapse_all(&self, dom: &mut DomTree) {
        if let Some(rendered) = &self.rendered {
            renderer::collapse_all(dom, rendered.list);
        }
    }

    /// The host element.
    #[must_use]
    pub const fn host(&self) -> NodeId {
        self.host
    }

    /// Presentation settings.
    #[must_use]
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Whether the component is between connect and disconnect.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// The loaded document, once rendered.
    #[must_use]
    pub const fn forest(&self) -> Option<&Forest> {
        self.forest.as_ref()
    }

    /// Handles into the rendered DOM, once rendered.
    #[must_use]
    pub const fn rendered(&self) -> Option<&RenderedTree> {
        self.rendered.as_ref()
    }

    /// The tooltip element while connected.
    #[must_use]
    pub fn tooltip_element(&self) -> Option<NodeId> {
        self.tooltip.as_ref().map(TooltipController::element)
    }

    /// Current tooltip state. Hidden while disconnected.
    #[must_use]
    pub fn tooltip_state(&self) -> TooltipState {
        self.tooltip
            .as_ref()
            .map(TooltipController::state)
            .unwrap_or_default()
    }

    /// Every diagnostic this instance has reported, oldest first.
    #[must_use]
    pub fn issues(&self) -> &[Diagnostic] {
        &self.issues
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.issues.push(diagnostic);
    }
}
