//! Domain-specific assertion macros for msdl harnesses.
//!
//! These add context-rich failure messages that make it clear *which* search
//! invariant was violated and on which record.

// ---------------------------------------------------------------------------
// Matcher assertions
// ---------------------------------------------------------------------------

/// Assert that every match record's text contains the query,
/// case-insensitively.
///
/// ```rust
/// assert_all_contain!(records, "64");
/// ```
#[macro_export]
macro_rules! assert_all_contain {
    ($records:expr, $query:expr) => {{
        let query: &str = $query;
        let folded = query.to_lowercase();
        for record in $records.iter() {
            if !record.matched_text.to_lowercase().contains(&folded) {
                panic!(
                    "assert_all_contain! failed:\n  query: {:?}\n  record {:?} matched on {:?}\n  text: {:?}",
                    query, record.target, record.kind, record.matched_text
                );
            }
        }
    }};
}

/// Assert that every record's target resolves in the catalog it was
/// produced from.
#[macro_export]
macro_rules! assert_targets_resolve {
    ($records:expr, $catalog:expr) => {{
        for record in $records.iter() {
            if $catalog.get(&record.target).is_none() {
                panic!(
                    "assert_targets_resolve! failed: record references {:?}, which is not in the catalog",
                    record.target
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Presenter assertions
// ---------------------------------------------------------------------------

/// Assert that no two presented fragments share a navigation target.
#[macro_export]
macro_rules! assert_unique_targets {
    ($presented:expr) => {{
        let mut seen = std::collections::HashSet::new();
        for fragment in $presented.fragments.iter() {
            if let Some(ref target) = fragment.target {
                if !seen.insert(target.clone()) {
                    panic!(
                        "assert_unique_targets! failed: {:?} appears more than once",
                        target
                    );
                }
            }
        }
    }};
}

/// Assert the exact highlight run structure of a fragment.
///
/// ```rust
/// assert_runs!(fragment, [("Nintendo ", false), ("64", true)]);
/// ```
#[macro_export]
macro_rules! assert_runs {
    ($fragment:expr, [$(($text:expr, $hit:expr)),* $(,)?]) => {{
        let expected: Vec<(&str, bool)> = vec![$(($text, $hit)),*];
        let actual: Vec<(&str, bool)> = $fragment
            .highlighted
            .runs
            .iter()
            .map(|r| (r.text.as_str(), r.hit))
            .collect();
        pretty_assertions::assert_eq!(actual, expected, "highlight runs differ");
    }};
}
