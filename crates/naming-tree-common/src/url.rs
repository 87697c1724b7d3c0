//! Resolution of `src` attributes against the page URL.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! NOTE: This covers what a document source needs (absolute URLs,
//! scheme-relative, origin-relative and path-relative references with `.`
//! and `..` segments). It is not a full URL parser.

use crate::net::SourceKind;

/// Resolve a potentially relative `src` against an optional base URL.
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: Otherwise, resolve url relative to base. Without a base the
/// reference is returned unchanged and later treated as a filesystem path.
#[must_use]
pub fn resolve_url(src: &str, base_url: Option<&str>) -> String {
    if SourceKind::of(src) != SourceKind::Path {
        return src.to_string();
    }

    let Some(base) = base_url else {
        return src.to_string();
    };
    let base = strip_query_and_fragment(base);

    if let Some(rest) = src.strip_prefix("//") {
        let scheme = base.split_once(':').map_or("https", |(scheme, _)| scheme);
        return format!("{scheme}://{rest}");
    }

    let (origin, base_path) = split_origin(base);

    if src.starts_with('/') {
        return format!("{origin}{}", normalize_segments(src));
    }

    let base_dir = base_path.rsplit_once('/').map_or("", |(dir, _)| dir);
    let joined = format!("{base_dir}/{src}");
    format!("{origin}{}", normalize_segments(&joined))
}

/// Drop `?query` and `#fragment` from a base URL.
fn strip_query_and_fragment(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Split `scheme://host/path` into (`scheme://host`, `/path`).
///
/// Bases without an authority (plain paths, `file:` paths) have an empty
/// origin.
fn split_origin(base: &str) -> (&str, &str) {
    base.find("://").map_or(("", base), |scheme_end| {
        let after_scheme = scheme_end + 3;
        base[after_scheme..]
            .find('/')
            .map_or((base, ""), |path_start| base.split_at(after_scheme + path_start))
    })
}

/// Remove `.` segments and apply `..` segments.
///
/// [§ 4.4 URL parsing](https://url.spec.whatwg.org/#url-parsing)
/// "single-dot path segment" / "double-dot path segment"
fn normalize_segments(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                let _ = out.pop();
            }
            other => out.push(other),
        }
    }
    let trailing = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");
    let mut joined = out.join("/");
    if absolute {
        joined.insert(0, '/');
    }
    if trailing && !joined.ends_with('/') {
        joined.push('/');
    }
    joined
}
