//! Catalog file watching — reload signals for the UI loop.
//!
//! The browser version of this tool picks up a new catalog on page reload.
//! Here a `notify` watcher observes the file and posts a unit signal onto a
//! tokio channel; the UI loop drains the channel each tick and reloads once
//! per drain, which coalesces editor-style multi-event writes.

use crate::source::DataError;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc;

pub struct CatalogWatcher {
    // Dropping the watcher stops event delivery; held for lifetime only.
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<()>,
}

impl CatalogWatcher {
    /// Watch a catalog file for modification.
    pub fn new(path: &Path) -> Result<Self, DataError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher =
            notify::recommended_watcher(move |res: Result<Event, notify::Error>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(%err, "catalog watcher error"),
            })
            .map_err(|err| DataError::Watch(err.to_string()))?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|err| DataError::Watch(err.to_string()))?;

        tracing::debug!(path = %path.display(), "watching catalog file");
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending change signals; true when at least one arrived since
    /// the last call.
    pub fn changed(&mut self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
