//! Centralized path resolution
//!
//! All default file and directory locations are resolved here.
//!
//! ## Path Strategy
//!
//! - **macOS**: `~/Library/Application Support/InsiderFeed/`
//! - **Windows**: `%LOCALAPPDATA%\InsiderFeed\`
//! - **Linux**: `$XDG_DATA_HOME/InsiderFeed/` (fallback `~/.local/share/InsiderFeed/`)
//!
//! `INSIDERFEED_HOME` overrides the base directory.
//!
//! ## Directory Structure
//!
//! ```text
//! InsiderFeed/
//! ├── data/
//! │ ├── config.toml
//! │ ├── tgInsiders_raw.json
//! │ ├── tgInsiders_parsed.json
//! │ └── tgInsiders_parsed_fixed.json
//! └── logs/
//!   └── insiderfeed_*.log
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "InsiderFeed";
const HOME_ENV: &str = "INSIDERFEED_HOME";

pub const RAW_FILE_NAME: &str = "tgInsiders_raw.json";
pub const PARSED_FILE_NAME: &str = "tgInsiders_parsed.json";
pub const FIXED_FILE_NAME: &str = "tgInsiders_parsed_fixed.json";

fn resolve_base_directory() -> PathBuf {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

/// Base directory for all data and logs
pub fn get_base_directory() -> PathBuf {
    resolve_base_directory()
}

/// Store files and config
pub fn get_data_directory() -> PathBuf {
    get_base_directory().join("data")
}

pub fn get_logs_directory() -> PathBuf {
    get_base_directory().join("logs")
}

pub fn get_config_path() -> PathBuf {
    get_data_directory().join("config.toml")
}

pub fn get_raw_captures_path() -> PathBuf {
    get_data_directory().join(RAW_FILE_NAME)
}

pub fn get_parsed_records_path() -> PathBuf {
    get_data_directory().join(PARSED_FILE_NAME)
}

pub fn get_fixed_records_path() -> PathBuf {
    get_data_directory().join(FIXED_FILE_NAME)
}

/// Use `configured` when set, otherwise the default path
pub fn resolve_configured_path(configured: &str, default: PathBuf) -> PathBuf {
    if configured.trim().is_empty() {
        default
    } else {
        PathBuf::from(configured)
    }
}

/// Ensures the base, data and logs directories exist
///
/// Called before logger initialization, so failures are reported as
/// plain strings.
pub fn ensure_all_directories() -> Result<(), String> {
    let dirs_to_create = [
        ("base", get_base_directory()),
        ("data", get_data_directory()),
        ("logs", get_logs_directory()),
    ];

    for (name, dir) in dirs_to_create {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                format!(
                    "Failed to create {} directory at {}: {}",
                    name,
                    dir.display(),
                    e
                )
            })?;
        }
    }

    Ok(())
}
