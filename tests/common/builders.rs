//! Test builders — ergonomic constructors for catalogs and subtypes, plus
//! proptest strategies for randomised corpora.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use msdl_core::{Catalog, DownloadLink, Subtype, SystemEntry};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// SubtypeBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Subtype`] test fixtures.
///
/// # Example
///
/// ```rust
/// let entry = SubtypeBuilder::new()
///     .title("Windows 11 24H2")
///     .version("build 26100")
///     .link("ed2k://win11.iso")
///     .build();
/// ```
#[derive(Default)]
pub struct SubtypeBuilder {
    inner: Subtype,
}

impl SubtypeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.inner.title = Some(title.into());
        self
    }

    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.inner.release_info = Some(release.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.inner.version_info = Some(version.into());
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.inner.download_links.push(DownloadLink {
            download_link: Some(url.into()),
            ..DownloadLink::default()
        });
        self
    }

    pub fn labelled_link(
        mut self,
        version_title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.inner.download_links.push(DownloadLink {
            version_title: Some(version_title.into()),
            download_link: Some(url.into()),
            ..DownloadLink::default()
        });
        self
    }

    pub fn build(self) -> Subtype {
        self.inner
    }
}

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Catalog`] test fixtures.
#[derive(Default)]
pub struct CatalogBuilder {
    systems: BTreeMap<String, SystemEntry>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) a system and attach one subtype to it.
    pub fn entry(
        mut self,
        system_key: &str,
        system_name: &str,
        subtype_key: &str,
        subtype: Subtype,
    ) -> Self {
        self.systems
            .entry(system_key.to_string())
            .or_insert_with(|| SystemEntry::new(system_name))
            .subtypes
            .insert(subtype_key.to_string(), subtype);
        self
    }

    pub fn build(self) -> Catalog {
        Catalog::new(self.systems)
    }
}

/// A one-system, one-subtype catalog — the smallest interesting corpus.
pub fn single_entry_catalog(
    system_key: &str,
    system_name: &str,
    subtype_key: &str,
    subtype: Subtype,
) -> Catalog {
    CatalogBuilder::new()
        .entry(system_key, system_name, subtype_key, subtype)
        .build()
}

// ---------------------------------------------------------------------------
// Proptest strategies
// ---------------------------------------------------------------------------

/// Random recipe for one subtype; `build` turns it into a real [`Subtype`].
#[derive(Debug, Clone, Arbitrary)]
pub struct SubtypeSpec {
    pub title: Option<String>,
    pub release_info: Option<String>,
    pub version_info: Option<String>,
    #[proptest(strategy = "proptest::collection::vec(any::<Option<String>>(), 0..3)")]
    pub links: Vec<Option<String>>,
}

impl SubtypeSpec {
    pub fn build(&self) -> Subtype {
        Subtype {
            title: self.title.clone(),
            release_info: self.release_info.clone(),
            version_info: self.version_info.clone(),
            download_links: self
                .links
                .iter()
                .map(|url| DownloadLink {
                    download_link: url.clone(),
                    ..DownloadLink::default()
                })
                .collect(),
            ..Subtype::default()
        }
    }
}

fn arb_system() -> impl Strategy<Value = SystemEntry> {
    (
        "[A-Za-z0-9 ]{1,12}",
        proptest::collection::btree_map(
            "[a-z0-9-]{1,10}",
            any::<SubtypeSpec>().prop_map(|spec| spec.build()),
            0..5,
        ),
    )
        .prop_map(|(name, subtypes)| {
            let mut entry = SystemEntry::new(name);
            entry.subtypes = subtypes;
            entry
        })
}

/// Random catalog: up to 4 systems of up to 4 subtypes each, with every
/// field optionally missing.
pub fn arb_catalog() -> impl Strategy<Value = Catalog> {
    proptest::collection::btree_map("[a-z]{1,8}", arb_system(), 0..4).prop_map(Catalog::new)
}

/// Random searchable query: ASCII alphanumeric, 2–6 chars.
pub fn arb_query() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{2,6}"
}
