//! msdl-data — catalog source adapters for msdl.
//!
//! A source reads a scraped `summary.json` document — from disk or from a
//! plain-HTTP mirror — and decodes it into an [`msdl_core::Catalog`].
//! Decoding is lenient: one malformed entry is skipped with a warning, it
//! never aborts the rest of the document. The optional [`CatalogWatcher`]
//! signals the UI loop over a tokio channel when a file-based catalog
//! changes on disk.

pub mod http;
pub mod known;
pub mod source;
pub mod watch;

pub use source::{parse_summary, CatalogSource, DataError};
pub use watch::CatalogWatcher;
