//! Diagnostics with colored terminal output.
//!
//! Warnings are deduplicated to avoid spamming the same message when a
//! document is loaded repeatedly. Errors always print. Used by the loader
//! and the component lifecycle to report problems without interrupting the
//! host page.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something was ignored or defaulted; rendering continues.
    Warning,
    /// An operation failed; the component stays empty.
    Error,
}

/// A single diagnostic entry, kept by components so hosts can inspect them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Warning or error.
    pub severity: Severity,
    /// Component that reported it (e.g. `"model-tree"`).
    pub component: String,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Build a warning entry.
    #[must_use]
    pub fn warning(component: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            component: component.to_string(),
            message: message.into(),
        }
    }

    /// Build an error entry.
    #[must_use]
    pub fn error(component: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            component: component.to_string(),
            message: message.into(),
        }
    }

    /// Print this entry to stderr. Warnings go through [`warn_once`].
    pub fn emit(&self) {
        match self.severity {
            Severity::Warning => warn_once(&self.component, &self.message),
            Severity::Error => error(&self.component, &self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {level}: {}", self.component, self.message)
    }
}

/// Warn about something ignored or defaulted (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("model-tree", "no src attribute; nothing to load");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[{component}] ⚠ {message}").yellow());
    }
}

/// Report a failure. Always printed.
pub fn error(component: &str, message: &str) {
    eprintln!("{}", format!("[{component}] ✖ {message}").red());
}

/// Clear all recorded warnings (call when loading a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_component_and_level() {
        let warning = Diagnostic::warning("model-tree", "no src attribute");
        assert_eq!(warning.to_string(), "model-tree: warning: no src attribute");
        let error = Diagnostic::error("model-tree", "failed to load t.yaml: HTTP error: 404");
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(error.to_string(), "model-tree: error: failed to load t.yaml: HTTP error: 404");
    }

    #[test]
    fn test_repeated_warnings_are_recorded_once() {
        clear_warnings();
        warn_once("test", "duplicate");
        warn_once("test", "duplicate");
        let guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
        let seen = guard.as_ref().map_or(0, |set| set.iter().filter(|k| k.contains("duplicate")).count());
        assert_eq!(seen, 1);
    }
}
