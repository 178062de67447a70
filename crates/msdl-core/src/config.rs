//! Configuration types for msdl.
//!
//! [`Config::load`] reads `~/.config/msdl/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
show_kind_labels    = true
tree_pane_width_pct = 28

[data]
catalog = "data/summary.json"
watch   = true

[search]
debounce_ms = 300
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/msdl/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_kind_labels")]
    pub show_kind_labels: bool,
    #[serde(default = "default_tree_pane_width_pct")]
    pub tree_pane_width_pct: u16,
}

fn default_show_kind_labels() -> bool { true }
fn default_tree_pane_width_pct() -> u16 { 28 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_kind_labels: default_show_kind_labels(),
            tree_pane_width_pct: default_tree_pane_width_pct(),
        }
    }
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path or `http://` URL of the catalog summary document.
    #[serde(default = "default_catalog")]
    pub catalog: String,
    /// Reload automatically when a file-based catalog changes on disk.
    #[serde(default = "default_watch")]
    pub watch: bool,
}

fn default_catalog() -> String { "data/summary.json".to_string() }
fn default_watch() -> bool { true }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            watch: default_watch(),
        }
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Quiet interval after the last keystroke before a search runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 { 300 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/msdl/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("msdl")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert!(cfg.ui.show_kind_labels);
        assert_eq!(cfg.ui.tree_pane_width_pct, 28);
        assert_eq!(cfg.data.catalog, "data/summary.json");
        assert!(cfg.data.watch);
        assert_eq!(cfg.search.debounce_ms, 300);
    }
}
