//! Matcher — linear scan of a [`Catalog`] for case-insensitive substring hits.
//!
//! [`search`] walks every `(system, subtype)` pair and checks four fields per
//! subtype in a fixed precedence order: title, release info, version info,
//! then each download link in stored order. Every matching field yields its
//! own [`MatchRecord`], so one subtype can contribute several records; the
//! presenter is responsible for collapsing those to one result per entry.
//!
//! The matcher is a pure function: no caching, no incremental state. Each
//! call recomputes the full scan, which is deliberate — the catalogs this
//! tool handles are a few hundred entries, and a recomputed scan keeps the
//! search trivially consistent with the catalog it was given.

use crate::catalog::{Catalog, Subtype, SubtypeRef};

/// Queries shorter than this never reach the matcher; callers guard first.
pub const MIN_QUERY_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A validated, trimmed search query.
///
/// Construction via [`Query::parse`] enforces the minimum length, so a
/// `Query` in hand is always searchable. The lowercase folding is computed
/// once here rather than per field comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    folded: String,
}

impl Query {
    /// Trim and validate user input. Returns `None` when the trimmed input
    /// is shorter than [`MIN_QUERY_LEN`] characters — the caller must not
    /// run a search at all in that case.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            return None;
        }
        Some(Self {
            raw: trimmed.to_string(),
            folded: trimmed.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Case-insensitive substring containment.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

// ---------------------------------------------------------------------------
// Match records
// ---------------------------------------------------------------------------

/// Which field of a subtype a record matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchKind {
    Title,
    Release,
    Version,
    Download,
}

impl MatchKind {
    /// Short label used in rendered results.
    pub fn label(self) -> &'static str {
        match self {
            MatchKind::Title => "title",
            MatchKind::Release => "release",
            MatchKind::Version => "version",
            MatchKind::Download => "download",
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One field-level hit, prior to deduplication.
///
/// Ephemeral: created per search, consumed by the presenter, discarded after
/// rendering. `target` always references an entry present in the catalog the
/// search ran against.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub kind: MatchKind,
    pub target: SubtypeRef,
    /// Display name of the owning system.
    pub system_name: String,
    /// Title of the matched subtype, when it has one.
    pub subtype_title: Option<String>,
    /// The full text of the field that matched.
    pub matched_text: String,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Scan the catalog for `query`, in catalog order.
///
/// Pure over its inputs; an empty catalog yields an empty vec. Missing
/// optional fields are non-matches, never errors.
pub fn search(catalog: &Catalog, query: &Query) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    for (system_key, system) in catalog.systems() {
        for (subtype_key, subtype) in &system.subtypes {
            scan_subtype(
                query,
                SubtypeRef::new(system_key, subtype_key),
                &system.name,
                subtype,
                &mut records,
            );
        }
    }
    tracing::debug!(query = %query, records = records.len(), "search complete");
    records
}

/// Check the four field kinds of one subtype, in precedence order.
fn scan_subtype(
    query: &Query,
    target: SubtypeRef,
    system_name: &str,
    subtype: &Subtype,
    records: &mut Vec<MatchRecord>,
) {
    let mut push = |kind: MatchKind, text: &str| {
        records.push(MatchRecord {
            kind,
            target: target.clone(),
            system_name: system_name.to_string(),
            subtype_title: subtype.title.clone(),
            matched_text: text.to_string(),
        });
    };

    if let Some(title) = subtype.title.as_deref() {
        if query.matches(title) {
            push(MatchKind::Title, title);
        }
    }
    if let Some(release) = subtype.release_info.as_deref() {
        if query.matches(release) {
            push(MatchKind::Release, release);
        }
    }
    if let Some(version) = subtype.version_info.as_deref() {
        if query.matches(version) {
            push(MatchKind::Version, version);
        }
    }
    for link in &subtype.download_links {
        if let Some(url) = link.download_link.as_deref() {
            if query.matches(url) {
                push(MatchKind::Download, url);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DownloadLink, SystemEntry};
    use std::collections::BTreeMap;

    fn catalog_with(subtype: Subtype) -> Catalog {
        let mut system = SystemEntry::new("Windows 11");
        system.subtypes.insert("win11-24h2".to_string(), subtype);
        let mut systems = BTreeMap::new();
        systems.insert("windows-11".to_string(), system);
        Catalog::new(systems)
    }

    #[test]
    fn query_parse_trims_and_enforces_min_len() {
        assert!(Query::parse("").is_none());
        assert!(Query::parse("x").is_none());
        assert!(Query::parse("  x  ").is_none());
        assert_eq!(Query::parse("  64 ").unwrap().as_str(), "64");
    }

    #[test]
    fn query_match_is_case_insensitive() {
        let q = Query::parse("LTSC").unwrap();
        assert!(q.matches("Windows 10 ltsc 2021"));
        assert!(q.matches("LTSC"));
        assert!(!q.matches("Windows 10 Home"));
    }

    #[test]
    fn field_precedence_order_per_subtype() {
        let subtype = Subtype {
            title: Some("Windows 11 24H2 x64".to_string()),
            release_info: Some("released 2024, x64 only".to_string()),
            version_info: Some("build 26100 x64".to_string()),
            download_links: vec![
                DownloadLink {
                    download_link: Some("ed2k://|file|win11_x64.iso|...".to_string()),
                    ..DownloadLink::default()
                },
                DownloadLink {
                    download_link: Some("magnet:?xt=urn:btih:x64abc".to_string()),
                    ..DownloadLink::default()
                },
            ],
            ..Subtype::default()
        };
        let records = search(&catalog_with(subtype), &Query::parse("x64").unwrap());
        let kinds: Vec<MatchKind> = records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MatchKind::Title,
                MatchKind::Release,
                MatchKind::Version,
                MatchKind::Download,
                MatchKind::Download,
            ]
        );
    }

    #[test]
    fn missing_fields_are_no_match_not_errors() {
        let records = search(&catalog_with(Subtype::default()), &Query::parse("win").unwrap());
        assert!(records.is_empty());
    }

    #[test]
    fn link_without_url_is_skipped() {
        let subtype = Subtype {
            download_links: vec![DownloadLink {
                version_title: Some("Windows 11 iso".to_string()),
                ..DownloadLink::default()
            }],
            ..Subtype::default()
        };
        // version_title is not a searched field; only download_link is.
        let records = search(&catalog_with(subtype), &Query::parse("windows").unwrap());
        assert!(records.is_empty());
    }

    #[test]
    fn empty_catalog_yields_empty_sequence() {
        let records = search(&Catalog::default(), &Query::parse("windows").unwrap());
        assert!(records.is_empty());
    }

    #[test]
    fn records_carry_resolvable_targets() {
        let catalog = catalog_with(Subtype {
            title: Some("Windows 11 24H2".to_string()),
            ..Subtype::default()
        });
        for record in search(&catalog, &Query::parse("24h2").unwrap()) {
            assert!(catalog.get(&record.target).is_some());
            assert_eq!(record.system_name, "Windows 11");
        }
    }
}
