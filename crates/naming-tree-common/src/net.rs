//! Fetch utilities for naming-tree documents.
//!
//! [Fetch Standard](https://fetch.spec.whatwg.org/)
//!
//! A `src` attribute may name an `http(s)://` resource, a `data:` URL, a
//! `file:` URL or a plain filesystem path. Network requests are blocking;
//! the component lifecycle decides whether a late result is still wanted.

use std::path::Path;
use std::time::Duration;

use base64::Engine;
use thiserror::Error;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = concat!("naming-tree/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Why a fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The `data:` URL could not be decoded.
    #[error("invalid data URL: {0}")]
    DataUrl(String),

    /// Reading a local file failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or timed out.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The response body could not be read or decoded.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// HTTP status code, when the failure was a non-success response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Where a source string points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `http://` or `https://`
    Http,
    /// `data:` URL with an inline payload
    Data,
    /// `file:` URL
    File,
    /// Anything else, treated as a filesystem path
    Path,
}

impl SourceKind {
    /// Classify a source string by its scheme.
    #[must_use]
    pub fn of(src: &str) -> Self {
        if src.starts_with("http://") || src.starts_with("https://") {
            Self::Http
        } else if src.starts_with("data:") {
            Self::Data
        } else if src.starts_with("file:") {
            Self::File
        } else {
            Self::Path
        }
    }
}

/// A parsed `data:` URL that can be decoded into raw bytes.
///
/// [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
///
/// "data:[<mediatype>][;base64],<data>"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataURL {
    /// Media type before the comma, without the `;base64` marker.
    /// Empty when the URL omits it.
    pub media_type: String,
    /// Whether the payload is base64-encoded.
    pub base64: bool,
    /// The raw payload after the comma.
    pub payload: String,
}

impl DataURL {
    /// Split a raw `data:` URL into its parts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if the scheme or the comma separator is missing.
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let rest = raw
            .strip_prefix("data:")
            .ok_or_else(|| FetchError::DataUrl("missing data: scheme".to_string()))?;
        let (metadata, payload) = rest
            .split_once(',')
            .ok_or_else(|| FetchError::DataUrl("missing comma".to_string()))?;

        let (media_type, base64) = metadata
            .strip_suffix(";base64")
            .map_or((metadata, false), |mt| (mt, true));

        Ok(Self {
            media_type: media_type.to_string(),
            base64,
            payload: payload.to_string(),
        })
    }

    /// Decode the payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if base64 decoding fails or a percent
    /// escape is malformed.
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        if self.base64 {
            base64::engine::general_purpose::STANDARD
                .decode(self.payload.trim())
                .map_err(|e| FetchError::DataUrl(format!("base64 decode error: {e}")))
        } else {
            percent_decode(&self.payload)
        }
    }
}

/// Decode `%XX` escapes. Everything else passes through unchanged.
fn percent_decode(input: &str) -> Result<Vec<u8>, FetchError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input
                .get(i + 1..i + 3)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| FetchError::DataUrl(format!("bad percent escape at byte {i}")))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Fetch a source and return its body as text.
///
/// # Errors
///
/// Returns a [`FetchError`] if the source cannot be read, the request fails,
/// the response has a non-success status, or the body is not valid UTF-8.
pub fn fetch_text(src: &str) -> Result<String, FetchError> {
    match SourceKind::of(src) {
        SourceKind::Http => http_get(src)?.text().map_err(FetchError::Body),
        _ => {
            let bytes = fetch_bytes(src)?;
            String::from_utf8(bytes)
                .map_err(|e| FetchError::DataUrl(format!("payload is not UTF-8: {e}")))
        }
    }
}

/// Fetch a source and return its body as raw bytes.
///
/// # Errors
///
/// Returns a [`FetchError`] if the source cannot be read, the request fails,
/// or the response has a non-success status.
pub fn fetch_bytes(src: &str) -> Result<Vec<u8>, FetchError> {
    match SourceKind::of(src) {
        SourceKind::Http => http_get(src)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(FetchError::Body),
        SourceKind::Data => DataURL::parse(src)?.decode(),
        SourceKind::File => read_file(file_url_path(src)),
        SourceKind::Path => read_file(src),
    }
}

/// Strip the `file:` scheme (and an empty authority) from a file URL.
fn file_url_path(src: &str) -> &str {
    let rest = src.trim_start_matches("file:");
    rest.strip_prefix("//").unwrap_or(rest)
}

fn read_file(path: &str) -> Result<Vec<u8>, FetchError> {
    std::fs::read(Path::new(path)).map_err(|source| FetchError::Io {
        path: path.to_string(),
        source,
    })
}

fn http_get(url: &str) -> Result<reqwest::blocking::Response, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(FetchError::Request)?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode_escapes() {
        assert_eq!(percent_decode("a%20b").unwrap(), b"a b");
        assert_eq!(percent_decode("%5B%5D").unwrap(), b"[]");
    }

    #[test]
    fn test_percent_decode_rejects_truncated_escape() {
        assert!(percent_decode("abc%2").is_err());
    }

    #[test]
    fn test_file_url_path() {
        assert_eq!(file_url_path("file:///tmp/x.yaml"), "/tmp/x.yaml");
        assert_eq!(file_url_path("file:/tmp/x.yaml"), "/tmp/x.yaml");
    }
}
