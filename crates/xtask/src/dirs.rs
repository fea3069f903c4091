//! Directory resolution for content and save slots
//!
//! Explicit arguments win, then environment variables (a `.env` file is
//! honoured), then defaults.

use std::path::PathBuf;

/// Content directory: `INVENTORY_DATA_DIR`, or `./data`.
pub fn content_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os("INVENTORY_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Save directory: `INVENTORY_SAVE_DIR`, or the platform data directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/grid-inventory/saves`
/// - Linux: `~/.local/share/grid-inventory/saves` (or `$XDG_DATA_HOME/...`)
/// - Windows: `%APPDATA%\grid-inventory\saves`
/// - Fallback: `./save_data/saves`
pub fn save_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os("INVENTORY_SAVE_DIR").map(PathBuf::from))
        .unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "grid-inventory")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./save_data"))
                .join("saves")
        })
}
