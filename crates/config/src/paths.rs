//! Path utilities

use std::path::PathBuf;

/// Data directory (~/.reagent), or `.reagent` when no home is known
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".reagent"))
        .unwrap_or_else(|| PathBuf::from(".reagent"))
}

/// Config file location
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}
