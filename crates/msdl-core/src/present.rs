//! Presenter — dedupe, truncate, and highlight raw match records.
//!
//! Result identity is per-entry, not per-field-match: records are keyed by
//! their [`SubtypeRef`] and only the first record for each entry (in the
//! matcher's field precedence order) survives. An entry whose title and
//! download link both match shows up once, with the title text. This is a
//! deliberate product decision carried over from the original site.
//!
//! Highlighting wraps every case-insensitive occurrence of the literal query
//! in a marked run. The query is escaped before being compiled into a
//! pattern, so metacharacters (`c++`, `win(arm)`) match literally.

use crate::catalog::SubtypeRef;
use crate::search::{MatchKind, MatchRecord, Query};
use regex::Regex;
use std::collections::HashSet;

/// Presenter keeps at most this many fragments.
pub const MAX_RESULTS: usize = 10;

// ---------------------------------------------------------------------------
// Highlight
// ---------------------------------------------------------------------------

/// One contiguous piece of matched-field text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    /// True when this run is an occurrence of the query.
    pub hit: bool,
}

/// Matched-field text split into highlighted and plain runs, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    pub runs: Vec<Run>,
}

impl Highlight {
    /// Highlight every occurrence of `query` in `text`.
    pub fn of(text: &str, query: &Query) -> Self {
        mark(text, &literal_pattern(query))
    }

    /// The underlying text with highlight boundaries discarded.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Case-insensitive pattern matching the query literally.
///
/// `regex::escape` neutralises metacharacters, so the compile cannot fail on
/// any user input.
fn literal_pattern(query: &Query) -> Regex {
    Regex::new(&format!("(?i){}", regex::escape(query.as_str())))
        .expect("escaped literal must be a valid pattern")
}

fn mark(text: &str, pattern: &Regex) -> Highlight {
    let mut runs = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            runs.push(Run {
                text: text[last..m.start()].to_string(),
                hit: false,
            });
        }
        runs.push(Run {
            text: m.as_str().to_string(),
            hit: true,
        });
        last = m.end();
    }
    if last < text.len() {
        runs.push(Run {
            text: text[last..].to_string(),
            hit: false,
        });
    }
    Highlight { runs }
}

// ---------------------------------------------------------------------------
// Fragments
// ---------------------------------------------------------------------------

/// A deduplicated, truncated, highlighted unit ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFragment {
    /// Entry title, falling back to the subtype key for untitled entries.
    pub display_title: String,
    pub system_name: String,
    /// `None` only on the informational no-results fragment.
    pub kind: Option<MatchKind>,
    pub highlighted: Highlight,
    /// Navigation target; `None` only on the no-results fragment.
    pub target: Option<SubtypeRef>,
}

impl RenderFragment {
    fn no_results() -> Self {
        Self {
            display_title: "No matching entries".to_string(),
            system_name: String::new(),
            kind: None,
            highlighted: Highlight::default(),
            target: None,
        }
    }

    /// True for the no-results placeholder, which is not activatable.
    pub fn is_informational(&self) -> bool {
        self.target.is_none()
    }
}

/// Presenter output: an ordered fragment list plus the empty-result flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Presented {
    pub is_empty: bool,
    pub fragments: Vec<RenderFragment>,
}

// ---------------------------------------------------------------------------
// Present
// ---------------------------------------------------------------------------

/// Collapse raw match records into at most [`MAX_RESULTS`] display fragments.
///
/// When nothing survives, the output is never an empty list: `is_empty` is
/// set and `fragments` holds exactly one informational placeholder.
pub fn present(records: &[MatchRecord], query: &Query) -> Presented {
    let pattern = literal_pattern(query);
    let mut seen: HashSet<&SubtypeRef> = HashSet::new();
    let mut fragments = Vec::new();

    for record in records {
        if !seen.insert(&record.target) {
            continue;
        }
        fragments.push(RenderFragment {
            display_title: record
                .subtype_title
                .clone()
                .unwrap_or_else(|| record.target.subtype.clone()),
            system_name: record.system_name.clone(),
            kind: Some(record.kind),
            highlighted: mark(&record.matched_text, &pattern),
            target: Some(record.target.clone()),
        });
        if fragments.len() == MAX_RESULTS {
            break;
        }
    }

    if fragments.is_empty() {
        return Presented {
            is_empty: true,
            fragments: vec![RenderFragment::no_results()],
        };
    }
    Presented {
        is_empty: false,
        fragments,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
