//! Loading mapping files from disk and resolving lookups.

use https_redirect::mapping::{load_mapping_file, parse, MappingError, ValidationError};

mod common;

use common::{MappingFixture, TESTHOST_WITH_ROOT};

#[test]
fn test_load_and_lookup_with_root() {
    let fixture = MappingFixture::new(TESTHOST_WITH_ROOT);
    let file = load_mapping_file(&fixture.path).unwrap();

    assert_eq!(file.get_redirect_uri("testhost", "/my-path"), "https://localhost:8081");
    assert_eq!(file.get_redirect_uri("testhost", "/anything"), "https://localhost:8082");
    assert_eq!(file.get_redirect_uri("other.example", "/docs"), "https://docs.example.com/start");
    assert_eq!(file.get_redirect_uri("other.example", "/"), "");
    assert_eq!(file.get_redirect_uri("unknown", "/my-path"), "");
}

#[test]
fn test_without_root_has_no_fallback() {
    let file = parse(b"mapping:\n  testhost:\n    \"/my-path\": https://localhost:8081\n").unwrap();
    assert_eq!(file.get_redirect_uri("testhost", "/my-path"), "https://localhost:8081");
    assert_eq!(file.get_redirect_uri("testhost", "/unknown"), "");
    assert_eq!(file.get_redirect_uri("testhost", "/"), "");
}

#[test]
fn test_localhost_rejected() {
    let err = parse(b"mapping:\n  localhost:\n    \"/\": https://x\n").unwrap_err();
    assert_eq!(
        err.validation(),
        Some(&ValidationError::ReservedHostName("localhost".into()))
    );
}

#[test]
fn test_empty_document_rejected() {
    let err = parse(b"---\n").unwrap_err();
    assert_eq!(err.validation(), Some(&ValidationError::EmptyMappingsFile));
}

#[test]
fn test_bad_entry_reports_host_and_path() {
    let err = parse(b"mapping:\n  shop.example:\n    \"/cart\": http://insecure.example\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("shop.example"), "{msg}");
    assert!(msg.contains("/cart"), "{msg}");
    assert!(matches!(
        err.validation().map(ValidationError::root),
        Some(ValidationError::InvalidRedirectScheme { .. })
    ));
}

#[test]
fn test_path_without_slash_rejected() {
    let err = parse(b"mapping:\n  h:\n    cart: https://x\n").unwrap_err();
    assert!(matches!(
        err.validation().map(ValidationError::root),
        Some(ValidationError::InvalidPath { .. })
    ));
}

#[test]
fn test_missing_file() {
    let fixture = MappingFixture::new(TESTHOST_WITH_ROOT);
    let missing = fixture.dir.path().join("absent.yaml");
    assert!(matches!(
        load_mapping_file(&missing).unwrap_err(),
        MappingError::NotFound(path) if path == missing
    ));
}

#[test]
fn test_directory_is_io_error() {
    let fixture = MappingFixture::new(TESTHOST_WITH_ROOT);
    assert!(matches!(
        load_mapping_file(fixture.dir.path()).unwrap_err(),
        MappingError::Io { .. }
    ));
}

#[test]
fn test_serialized_file_parses_back() {
    let file = parse(TESTHOST_WITH_ROOT.as_bytes()).unwrap();
    let rendered = serde_yaml::to_string(&file).unwrap();
    let reparsed = parse(rendered.as_bytes()).unwrap();
    assert_eq!(reparsed, file);
    assert!(reparsed.validate().is_ok());
}

#[test]
fn test_mappings_file_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<https_redirect::MappingsFile>();
    assert_send_sync::<https_redirect::MappingStore>();
}

#[test]
fn test_example_files_are_valid() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));

    let file = load_mapping_file(&root.join("mapping.example.yaml")).unwrap();
    assert_eq!(file.get_redirect_uri("docs.example.org", "/v1"), "https://example.org/docs/v1/");
    assert_eq!(file.get_redirect_uri("www.example.org", "/any"), "https://example.org");

    let config = https_redirect::config::load_config(&root.join("https-redirect.example.toml")).unwrap();
    assert_eq!(config.mapping_file, std::path::Path::new("mapping.example.yaml"));
}
