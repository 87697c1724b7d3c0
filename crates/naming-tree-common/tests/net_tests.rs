//! Tests for non-network fetch paths: `data:` URLs and local files.

use std::io::Write;

use naming_tree_common::net::{DataURL, FetchError, SourceKind, fetch_text};

#[test]
fn test_source_kind_classification() {
    assert_eq!(SourceKind::of("https://example.com/t.yaml"), SourceKind::Http);
    assert_eq!(SourceKind::of("http://example.com/t.yaml"), SourceKind::Http);
    assert_eq!(SourceKind::of("data:,x"), SourceKind::Data);
    assert_eq!(SourceKind::of("file:///t.yaml"), SourceKind::File);
    assert_eq!(SourceKind::of("t.yaml"), SourceKind::Path);
}

#[test]
fn test_data_url_parse_base64() {
    let url = DataURL::parse("data:text/yaml;base64,LSBuYW1lOiBB").unwrap();
    assert_eq!(url.media_type, "text/yaml");
    assert!(url.base64);
    assert_eq!(url.decode().unwrap(), b"- name: A");
}

#[test]
fn test_data_url_percent_encoded() {
    let text = fetch_text("data:text/yaml,-%20name%3A%20A").unwrap();
    assert_eq!(text, "- name: A");
}

#[test]
fn test_data_url_without_comma_is_an_error() {
    let err = DataURL::parse("data:text/yaml").unwrap_err();
    assert!(matches!(err, FetchError::DataUrl(_)));
}

#[test]
fn test_fetch_text_from_path_and_file_url() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"- name: Root\n").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    assert_eq!(fetch_text(&path).unwrap(), "- name: Root\n");
    assert_eq!(fetch_text(&format!("file://{path}")).unwrap(), "- name: Root\n");
}

#[test]
fn test_missing_file_reports_path() {
    let err = fetch_text("/definitely/not/here/tree.yaml").unwrap_err();
    assert!(matches!(err, FetchError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here/tree.yaml"));
    assert_eq!(err.status(), None);
}

#[test]
fn test_status_error_display() {
    let err = FetchError::Status(404);
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "HTTP error: 404");
}
