//! Well-known system keys.
//!
//! The scraper's source site groups pages under a handful of fixed top-level
//! keys. When a catalog document omits a system's display name, these
//! provide the fallback before resorting to the raw key.

use phf::phf_map;

static KNOWN_SYSTEMS: phf::Map<&'static str, &'static str> = phf_map! {
    "windows-11" => "Windows 11",
    "windows-10" => "Windows 10",
    "windows-server" => "Windows Server",
    "operating-systems" => "Windows (legacy)",
    "applications" => "Office",
    "servers" => "SQL Server",
};

/// Display name for a well-known system key.
pub fn display_name(key: &str) -> Option<&'static str> {
    KNOWN_SYSTEMS.get(key).copied()
}
