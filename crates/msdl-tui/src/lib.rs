//! msdl TUI — ratatui application shell.

pub mod app;
pub mod clipboard;
pub mod commands;
pub mod debounce;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use anyhow::Context;
use msdl_core::config::Config;
use msdl_data::{CatalogSource, CatalogWatcher};

/// Load the catalog from `source` and start the TUI.
///
/// A missing or unreadable catalog at startup is fatal; once running, reload
/// failures keep the previous catalog and are only logged.
pub fn run(config: Config, source: CatalogSource) -> anyhow::Result<()> {
    let catalog = source
        .load()
        .with_context(|| format!("loading catalog from {source}"))?;
    tracing::info!(
        systems = catalog.system_count(),
        entries = catalog.entry_count(),
        "catalog loaded"
    );

    let watcher = match source.path() {
        Some(path) if config.data.watch => match CatalogWatcher::new(path) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                tracing::warn!(%err, "catalog watch unavailable, continuing without");
                None
            }
        },
        _ => None,
    };

    let theme = theme::Theme::load_default();
    App::new(catalog, source, config, theme).run(watcher)
}
