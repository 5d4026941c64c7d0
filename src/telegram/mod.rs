//! Telegram intake
//!
//! ```text
//! telegram/
//! ├── mod.rs        # This file - public API
//! ├── listener.rs   # getUpdates long polling loop
//! ├── filter.rs     # Source chat / sender selection
//! └── entities.rs   # teloxide message → InboundMessage
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use insiderfeed::telegram::TelegramListener;
//!
//! let listener = TelegramListener::new(&config.telegram, capture)?;
//! listener.run(shutdown).await?;
//! ```

pub mod entities;
pub mod filter;
pub mod listener;

pub use entities::{convert_entity, inbound_from_message};
pub use filter::SourceFilter;
pub use listener::{deliver, Delivery, MessageContext, TelegramListener};
