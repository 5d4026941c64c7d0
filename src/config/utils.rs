/// Configuration utilities - loading and env overrides
///
/// The configuration is loaded once at startup and handed to the listener,
/// stores and repair pass by value; nothing here keeps global state.
use super::schemas::Config;
use crate::errors::{FeedError, FeedResult};
use crate::logger::{self, LogTag};
use crate::paths;
use std::path::Path;

/// Environment variable overriding `telegram.bot_token`
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Load configuration from the default location (`<data dir>/config.toml`)
pub fn load_config() -> FeedResult<Config> {
    load_config_from_path(&paths::get_config_path())
}

/// Load configuration from a specific TOML file
///
/// A missing file yields defaults; an unreadable or malformed file is an
/// error. Environment overrides are applied afterwards.
pub fn load_config_from_path(path: &Path) -> FeedResult<Config> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FeedError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        parse_config(&contents).map_err(|e| {
            FeedError::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        Config::default()
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML document into a Config (missing sections take defaults)
pub fn parse_config(contents: &str) -> FeedResult<Config> {
    Ok(toml::from_str::<Config>(contents)?)
}

/// Apply environment overrides (after `.env` has been loaded by the caller)
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(token) = std::env::var(BOT_TOKEN_ENV) {
        if !token.trim().is_empty() {
            config.telegram.bot_token = token.trim().to_string();
        }
    }
}
