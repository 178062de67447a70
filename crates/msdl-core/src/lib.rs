//! msdl-core — catalog model and search pipeline for msdl.
//!
//! This crate holds everything that does not touch a terminal or the
//! filesystem: the in-memory [`Catalog`] built from a scraped `summary.json`
//! document, the [`search`](search::search) matcher, the
//! [`present`](present::present) step that turns raw matches into renderable
//! fragments, and the application [`config`].
//!
//! # Pipeline
//!
//! ```text
//! Source ──► Catalog ──► Matcher ──► Presenter ──► UI
//! ```
//!
//! Matcher and Presenter are pure functions over their inputs; the catalog is
//! immutable for the duration of a search and is only ever replaced
//! wholesale by a reload.

pub mod catalog;
pub mod config;
pub mod present;
pub mod search;

pub use catalog::{Catalog, DownloadLink, Subtype, SubtypeRef, SystemEntry};
pub use present::{present, Highlight, Presented, RenderFragment, Run, MAX_RESULTS};
pub use search::{search, MatchKind, MatchRecord, Query, MIN_QUERY_LEN};
