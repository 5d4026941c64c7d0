//! Configuration system
//!
//! - `macros`: `config_struct!` for structs with embedded defaults
//! - `schemas`: the configuration sections
//! - `utils`: loading, env overrides, saving

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, LinksConfig, StorageConfig, TelegramConfig};
pub use utils::{apply_env_overrides, load_config, load_config_from_path, parse_config, BOT_TOKEN_ENV};
