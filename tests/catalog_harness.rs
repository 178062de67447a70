//! Catalog source integration harness.
//!
//! # What this covers
//!
//! - **File source**: a `summary.json` on disk loads into a catalog and is
//!   immediately searchable.
//! - **Lenient decoding**: malformed subtype entries are skipped without
//!   aborting the document; a missing `systems` object yields an empty
//!   catalog, not an error.
//! - **Name resolution**: document name → well-known key fallback → raw key.
//! - **Timestamps**: the scraper's zone-less ISO-8601 strings parse.
//! - **Failure modes**: missing file and invalid JSON surface as typed
//!   errors.
//!
//! # Running
//!
//! ```sh
//! cargo test --test catalog_harness
//! ```

mod common;
use common::*;

use msdl_core::{search, Query, SubtypeRef};
use msdl_data::{parse_summary, CatalogSource, DataError};
use pretty_assertions::assert_eq;
use std::io::Write;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

// ---------------------------------------------------------------------------
// File source
// ---------------------------------------------------------------------------

#[test]
fn file_source_loads_and_is_searchable() {
    let file = write_temp(SUMMARY_JSON);
    let source = CatalogSource::parse(&file.path().to_string_lossy());
    let catalog = source.load().expect("fixture must load");

    assert_eq!(catalog.system_count(), 3);
    // win10-broken is dropped, the other four entries survive.
    assert_eq!(catalog.entry_count(), 4);

    let query = Query::parse("24h2").unwrap();
    let records = search(&catalog, &query);
    assert!(!records.is_empty());
    assert_eq!(
        records[0].target,
        SubtypeRef::new("windows-11", "win11-24h2")
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let source = CatalogSource::File("does/not/exist/summary.json".into());
    assert!(matches!(source.load(), Err(DataError::Io(_))));
}

#[test]
fn invalid_json_is_a_json_error() {
    let file = write_temp("<html>not a catalog</html>");
    let source = CatalogSource::File(file.path().to_path_buf());
    assert!(matches!(source.load(), Err(DataError::Json(_))));
}

// ---------------------------------------------------------------------------
// Lenient decoding
// ---------------------------------------------------------------------------

#[test]
fn malformed_entries_are_skipped_silently() {
    let catalog = parse_summary(SUMMARY_JSON.as_bytes()).expect("fixture must decode");
    let windows_10 = catalog.system("windows-10").expect("system present");
    assert_eq!(windows_10.subtypes.len(), 1);
    assert!(windows_10.subtypes.contains_key("win10-22h2"));
    assert!(!windows_10.subtypes.contains_key("win10-broken"));
}

#[test]
fn document_without_systems_is_an_empty_catalog() {
    let catalog = parse_summary(EMPTY_JSON.as_bytes()).expect("document must decode");
    assert!(catalog.is_empty());
    assert_eq!(catalog.entry_count(), 0);
}

// ---------------------------------------------------------------------------
// Name resolution + metadata
// ---------------------------------------------------------------------------

#[test]
fn unnamed_known_system_uses_wellknown_name() {
    let catalog = parse_summary(SUMMARY_JSON.as_bytes()).unwrap();
    // The fixture's "servers" entry has no name field.
    assert_eq!(catalog.system("servers").unwrap().name, "SQL Server");
}

#[test]
fn document_names_win_over_wellknown_names() {
    let doc = r#"{"systems": {"windows-11": {"name": "Custom Eleven", "subtypes": {}}}}"#;
    let catalog = parse_summary(doc.as_bytes()).unwrap();
    assert_eq!(catalog.system("windows-11").unwrap().name, "Custom Eleven");
}

#[test]
fn zoneless_timestamps_parse() {
    let catalog = parse_summary(SUMMARY_JSON.as_bytes()).unwrap();
    let ts = catalog.last_updated.expect("document timestamp");
    assert_eq!(ts.format("%Y-%m-%d").to_string(), "2024-05-01");

    let entry = catalog
        .get(&SubtypeRef::new("windows-11", "win11-24h2"))
        .unwrap();
    assert!(entry.last_updated.is_some());
}

#[test]
fn download_link_labels_survive_decoding() {
    let catalog = parse_summary(SUMMARY_JSON.as_bytes()).unwrap();
    let entry = catalog
        .get(&SubtypeRef::new("windows-11", "win11-24h2"))
        .unwrap();
    assert_eq!(entry.download_links.len(), 2);
    assert_eq!(entry.download_links[0].sub_version.as_deref(), Some("x64"));
    assert_eq!(
        entry.download_links[1].download_link.as_deref(),
        Some("magnet:?xt=urn:btih:24h2arm64")
    );
}
