/// Configuration schemas - every section defined once with its defaults
use crate::config_struct;
use crate::links::{default_aliases, default_rules, LinkRule};
use crate::paths;
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// TELEGRAM CONFIGURATION
// ============================================================================

config_struct! {
    /// Telegram listener configuration
    pub struct TelegramConfig {
        /// Enable the listener
        enabled: bool = true,

        /// Bot token from @BotFather (TELEGRAM_BOT_TOKEN overrides)
        bot_token: String = String::new(),

        /// Channel or group the alerts are forwarded into (empty = any chat)
        ///
        /// The Bot API does not deliver messages sent by other bots, so the
        /// alert bot itself cannot be followed directly.
        source_chat_id: String = String::new(),

        /// Only accept messages attributable to this username, without '@' (empty = any sender)
        source_username: String = String::new(),

        /// Long-poll timeout for getUpdates
        poll_timeout_secs: u32 = 10,

        /// Pause after a failed poll before retrying
        retry_delay_secs: u64 = 1,
    }
}

// ============================================================================
// STORAGE CONFIGURATION
// ============================================================================

config_struct! {
    /// Store file locations (empty = default under the data directory)
    pub struct StorageConfig {
        raw_path: String = String::new(),
        parsed_path: String = String::new(),
        fixed_path: String = String::new(),
    }
}

// ============================================================================
// LINK CLASSIFICATION CONFIGURATION
// ============================================================================

config_struct! {
    /// Link classification tables
    pub struct LinksConfig {
        /// Ordered URL substring rules, first match wins
        rules: Vec<LinkRule> = default_rules(),

        /// Legacy short labels mapped to canonical categories
        aliases: BTreeMap<String, String> = default_aliases(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        telegram: TelegramConfig = TelegramConfig::default(),
        storage: StorageConfig = StorageConfig::default(),
        links: LinksConfig = LinksConfig::default(),
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl TelegramConfig {
    /// Validate listener settings before connecting
    pub fn validate(&self) -> Result<(), String> {
        if self.bot_token.trim().is_empty() {
            return Err("Bot token is not configured".to_string());
        }

        if self.parsed_chat_id()?.is_none() && self.normalized_username().is_none() {
            return Err("Set source_chat_id or source_username to select the alert feed".to_string());
        }

        Ok(())
    }

    /// Configured chat id, if any
    pub fn parsed_chat_id(&self) -> Result<Option<i64>, String> {
        let raw = self.source_chat_id.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        raw.parse::<i64>()
            .map(Some)
            .map_err(|e| format!("Invalid source_chat_id '{}': {}", raw, e))
    }

    /// Username lowercased and stripped of '@'
    pub fn normalized_username(&self) -> Option<String> {
        let name = self.source_username.trim().trim_start_matches('@');
        if name.is_empty() {
            None
        } else {
            Some(name.to_lowercase())
        }
    }
}

impl StorageConfig {
    pub fn raw_path(&self) -> PathBuf {
        paths::resolve_configured_path(&self.raw_path, paths::get_raw_captures_path())
    }

    pub fn parsed_path(&self) -> PathBuf {
        paths::resolve_configured_path(&self.parsed_path, paths::get_parsed_records_path())
    }

    pub fn fixed_path(&self) -> PathBuf {
        paths::resolve_configured_path(&self.fixed_path, paths::get_fixed_records_path())
    }
}
