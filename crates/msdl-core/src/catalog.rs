//! Catalog types — the in-memory form of a scraped `summary.json` document.
//!
//! A catalog maps *system keys* (`"windows-11"`) to [`SystemEntry`] values,
//! each of which maps *subtype keys* (`"win11-24h2"`) to [`Subtype`] leaf
//! entries. Keys are unique within their map; insertion order carries no
//! meaning, so both levels use `BTreeMap` — iteration is key-ordered and
//! repeated searches over the same catalog produce identical output.
//!
//! The catalog is read-only after load. A reload builds a fresh `Catalog`
//! and swaps it in wholesale; nothing mutates an entry in place.

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A loaded download catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// When the scraper last refreshed the document. The scraper writes
    /// zone-less ISO-8601, hence `NaiveDateTime`.
    pub last_updated: Option<NaiveDateTime>,
    systems: BTreeMap<String, SystemEntry>,
}

impl Catalog {
    pub fn new(systems: BTreeMap<String, SystemEntry>) -> Self {
        Self {
            last_updated: None,
            systems,
        }
    }

    pub fn with_last_updated(mut self, ts: NaiveDateTime) -> Self {
        self.last_updated = Some(ts);
        self
    }

    /// Systems in key order.
    pub fn systems(&self) -> impl Iterator<Item = (&str, &SystemEntry)> {
        self.systems.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn system(&self, key: &str) -> Option<&SystemEntry> {
        self.systems.get(key)
    }

    /// Resolve a navigation key to its leaf entry.
    pub fn get(&self, target: &SubtypeRef) -> Option<&Subtype> {
        self.systems
            .get(&target.system)?
            .subtypes
            .get(&target.subtype)
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Total number of subtype entries across all systems.
    pub fn entry_count(&self) -> usize {
        self.systems.values().map(|s| s.subtypes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// One top-level grouping (a console-of-sorts: "Windows 11", "Office", …).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemEntry {
    /// Human-readable display name, resolved at load time (document `name`
    /// field, well-known fallback, or the raw key).
    pub name: String,
    pub subtypes: BTreeMap<String, Subtype>,
}

impl SystemEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtypes: BTreeMap::new(),
        }
    }
}

/// A leaf catalog entry — one edition/release page of a system.
///
/// Every field is optional: the scraper records whatever the source page
/// carried. Absent fields are simply never matched by a search.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Subtype {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub release_info: Option<String>,
    pub version_info: Option<String>,
    pub download_links: Vec<DownloadLink>,
    /// Source page the entry was scraped from.
    pub url: Option<String>,
    pub last_updated: Option<NaiveDateTime>,
}

/// One download entry under a subtype, in scraped order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DownloadLink {
    /// Heading of the section the link was found under.
    pub version_title: Option<String>,
    /// Sub-edition label (architecture, language, …), when present.
    pub sub_version: Option<String>,
    pub download_link: Option<String>,
}

// ---------------------------------------------------------------------------
// Navigation key
// ---------------------------------------------------------------------------

/// Composite key identifying one subtype within the catalog.
///
/// This is the identity used for result deduplication and for navigation to
/// an entry's detail location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubtypeRef {
    pub system: String,
    pub subtype: String,
}

impl SubtypeRef {
    pub fn new(system: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            subtype: subtype.into(),
        }
    }

    /// Path of the entry's generated detail page, relative to the site root.
    pub fn detail_path(&self) -> String {
        format!("data/{}/{}/detail.html", self.system, self.subtype)
    }
}

impl std::fmt::Display for SubtypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.system, self.subtype)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut subtypes = BTreeMap::new();
        subtypes.insert(
            "win11-24h2".to_string(),
            Subtype {
                title: Some("Windows 11 24H2".to_string()),
                ..Subtype::default()
            },
        );
        let mut systems = BTreeMap::new();
        systems.insert(
            "windows-11".to_string(),
            SystemEntry {
                name: "Windows 11".to_string(),
                subtypes,
            },
        );
        Catalog::new(systems)
    }

    #[test]
    fn get_resolves_existing_target() {
        let catalog = sample();
        let target = SubtypeRef::new("windows-11", "win11-24h2");
        let entry = catalog.get(&target).expect("target must resolve");
        assert_eq!(entry.title.as_deref(), Some("Windows 11 24H2"));
    }

    #[test]
    fn get_returns_none_for_unknown_target() {
        let catalog = sample();
        assert!(catalog.get(&SubtypeRef::new("windows-11", "win11-9x")).is_none());
        assert!(catalog.get(&SubtypeRef::new("amiga", "a500")).is_none());
    }

    #[test]
    fn counts() {
        let catalog = sample();
        assert_eq!(catalog.system_count(), 1);
        assert_eq!(catalog.entry_count(), 1);
        assert!(!catalog.is_empty());
        assert!(Catalog::default().is_empty());
    }

    #[test]
    fn detail_path_shape() {
        let target = SubtypeRef::new("windows-10", "win10-22h2");
        assert_eq!(target.detail_path(), "data/windows-10/win10-22h2/detail.html");
    }

    #[test]
    fn subtype_deserializes_with_missing_fields() {
        let entry: Subtype = serde_json::from_str("{}").expect("empty object is a valid subtype");
        assert_eq!(entry, Subtype::default());

        let entry: Subtype = serde_json::from_str(
            r#"{"title": "Office 2024", "download_links": [{"download_link": "ed2k://x"}]}"#,
        )
        .expect("partial subtype must parse");
        assert_eq!(entry.title.as_deref(), Some("Office 2024"));
        assert_eq!(entry.download_links.len(), 1);
        assert_eq!(entry.download_links[0].download_link.as_deref(), Some("ed2k://x"));
        assert!(entry.release_info.is_none());
    }
}
