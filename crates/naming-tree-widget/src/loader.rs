//! Fetching and parsing a document into a [`Forest`].
//!
//! The component never talks to the network directly. It asks a
//! [`Fetcher`] for the text behind its `src` attribute, so hosts and tests
//! decide where documents come from.

use std::collections::HashMap;

use naming_tree_common::net::{self, FetchError};
use naming_tree_data::{Forest, ParseError, parse_document};
use thiserror::Error;

/// The two ways loading can fail.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The document was fetched but is not a tree.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Source of document text.
pub trait Fetcher {
    /// Fetch `src` and return its body as text.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the resource cannot be retrieved.
    fn fetch_text(&self, src: &str) -> Result<String, FetchError>;
}

impl<F> Fetcher for F
where
    F: Fn(&str) -> Result<String, FetchError>,
{
    fn fetch_text(&self, src: &str) -> Result<String, FetchError> {
        self(src)
    }
}

/// Fetches over HTTP(S), from `data:` URLs and from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetFetcher;

impl Fetcher for NetFetcher {
    fn fetch_text(&self, src: &str) -> Result<String, FetchError> {
        net::fetch_text(src)
    }
}

/// Serves documents from memory. Unknown sources answer `404`.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    documents: HashMap<String, String>,
}

impl StaticFetcher {
    /// An empty fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` for `src`.
    #[must_use]
    pub fn with(mut self, src: &str, text: &str) -> Self {
        let _ = self.documents.insert(src.to_string(), text.to_string());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch_text(&self, src: &str) -> Result<String, FetchError> {
        self.documents
            .get(src)
            .cloned()
            .ok_or(FetchError::Status(404))
    }
}

/// Fetch `src` and parse it.
///
/// # Errors
///
/// Returns [`LoadError::Fetch`] or [`LoadError::Parse`].
pub fn load_forest(fetcher: &dyn Fetcher, src: &str) -> Result<Forest, LoadError> {
    let text = fetcher.fetch_text(src)?;
    Ok(parse_document(&text)?)
}
