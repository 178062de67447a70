//! Catalog sources — where a `summary.json` document comes from, and the
//! lenient decoder that turns one into a [`Catalog`].
//!
//! The document shape is what the scraper writes:
//!
//! ```json
//! {
//!   "last_updated": "2024-01-15T10:00:00.123456",
//!   "systems": {
//!     "windows-11": {
//!       "name": "Windows 11",
//!       "subtypes": { "win11-24h2": { "title": "…", "download_links": [] } }
//!     }
//!   }
//! }
//! ```
//!
//! Decoding is per-entry: a subtype that fails to deserialize is skipped
//! with a warning and the rest of the catalog survives. A document with no
//! usable `systems` object decodes to an empty catalog rather than an error;
//! only unreadable bytes or invalid JSON fail the load.

use crate::{http, known};
use chrono::NaiveDateTime;
use msdl_core::{Catalog, Subtype, SystemEntry};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog fetch failed: {0}")]
    Fetch(String),
    #[error("catalog watch failed: {0}")]
    Watch(String),
}

// ---------------------------------------------------------------------------
// CatalogSource
// ---------------------------------------------------------------------------

/// A place a catalog document can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    /// Plain-`http://` mirror URL. TLS is out of scope; catalogs are served
    /// from local mirrors.
    Http(String),
}

impl CatalogSource {
    /// Interpret a CLI/config spec string: anything starting with `http://`
    /// is a mirror URL, everything else a filesystem path.
    pub fn parse(spec: &str) -> Self {
        if spec.starts_with("http://") {
            CatalogSource::Http(spec.to_string())
        } else {
            CatalogSource::File(PathBuf::from(spec))
        }
    }

    /// The on-disk path, when this source is watchable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            CatalogSource::File(path) => Some(path),
            CatalogSource::Http(_) => None,
        }
    }

    /// Load and decode the document. Synchronous: the HTTP variant spins up
    /// a current-thread runtime for the duration of the fetch, so reload can
    /// be called from the UI loop.
    pub fn load(&self) -> Result<Catalog, DataError> {
        let bytes = match self {
            CatalogSource::File(path) => std::fs::read(path)?,
            CatalogSource::Http(url) => {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?;
                rt.block_on(http::fetch(url))?
            }
        };
        parse_summary(&bytes)
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Http(url) => f.write_str(url),
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a `summary.json` document.
pub fn parse_summary(bytes: &[u8]) -> Result<Catalog, DataError> {
    let doc: Value = serde_json::from_slice(bytes)?;

    let mut systems = BTreeMap::new();
    match doc.get("systems").and_then(Value::as_object) {
        Some(map) => {
            for (key, raw) in map {
                if let Some(entry) = system_from_value(key, raw) {
                    systems.insert(key.clone(), entry);
                }
            }
        }
        None => tracing::warn!("catalog document has no systems object"),
    }

    let mut catalog = Catalog::new(systems);
    if let Some(ts) = doc.get("last_updated").and_then(Value::as_str) {
        match ts.parse::<NaiveDateTime>() {
            Ok(parsed) => catalog = catalog.with_last_updated(parsed),
            Err(err) => tracing::warn!(%err, ts, "unparseable catalog timestamp"),
        }
    }

    tracing::debug!(
        systems = catalog.system_count(),
        entries = catalog.entry_count(),
        "catalog decoded"
    );
    Ok(catalog)
}

fn system_from_value(key: &str, raw: &Value) -> Option<SystemEntry> {
    let Some(obj) = raw.as_object() else {
        tracing::warn!(system = key, "skipping non-object system entry");
        return None;
    };

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| known::display_name(key).map(str::to_string))
        .unwrap_or_else(|| key.to_string());

    let mut entry = SystemEntry::new(name);
    if let Some(subtypes) = obj.get("subtypes").and_then(Value::as_object) {
        for (subtype_key, value) in subtypes {
            match serde_json::from_value::<Subtype>(value.clone()) {
                Ok(subtype) => {
                    entry.subtypes.insert(subtype_key.clone(), subtype);
                }
                Err(err) => {
                    tracing::warn!(system = key, subtype = %subtype_key, %err, "skipping malformed catalog entry");
                }
            }
        }
    }
    Some(entry)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "last_updated": "2024-05-01T12:30:00.500000",
        "systems": {
            "windows-11": {
                "name": "Windows 11",
                "subtypes": {
                    "win11-24h2": {
                        "title": "Windows 11 24H2",
                        "release_info": "2024 feature update",
                        "download_links": [
                            {"version_title": "consumer", "download_link": "ed2k://win11.iso"}
                        ]
                    }
                }
            }
        }
    }"#;

    #[test]
    fn decodes_well_formed_document() {
        let catalog = parse_summary(DOC.as_bytes()).expect("document must decode");
        assert_eq!(catalog.system_count(), 1);
        assert_eq!(catalog.entry_count(), 1);
        assert!(catalog.last_updated.is_some());
        let system = catalog.system("windows-11").unwrap();
        assert_eq!(system.name, "Windows 11");
    }

    #[test]
    fn malformed_subtype_is_skipped_not_fatal() {
        let doc = r#"{"systems": {"windows-10": {"name": "Windows 10", "subtypes": {
            "win10-22h2": {"title": "Windows 10 22H2"},
            "win10-bad": {"title": 42}
        }}}}"#;
        let catalog = parse_summary(doc.as_bytes()).expect("document must decode");
        let system = catalog.system("windows-10").unwrap();
        assert_eq!(system.subtypes.len(), 1);
        assert!(system.subtypes.contains_key("win10-22h2"));
    }

    #[test]
    fn missing_systems_object_yields_empty_catalog() {
        let catalog = parse_summary(b"{\"last_updated\": \"nonsense\"}").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.last_updated.is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(parse_summary(b"not json"), Err(DataError::Json(_))));
    }

    #[test]
    fn system_name_falls_back_to_known_then_key() {
        let doc = r#"{"systems": {
            "windows-server": {"subtypes": {}},
            "mystery-os": {"subtypes": {}}
        }}"#;
        let catalog = parse_summary(doc.as_bytes()).unwrap();
        assert_eq!(catalog.system("windows-server").unwrap().name, "Windows Server");
        assert_eq!(catalog.system("mystery-os").unwrap().name, "mystery-os");
    }

    #[test]
    fn source_spec_parsing() {
        assert_eq!(
            CatalogSource::parse("http://mirror.lan/summary.json"),
            CatalogSource::Http("http://mirror.lan/summary.json".to_string())
        );
        assert!(matches!(
            CatalogSource::parse("data/summary.json"),
            CatalogSource::File(_)
        ));
    }
}
