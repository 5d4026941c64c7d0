//! Long-polling listener
//!
//! Polls `getUpdates` with an update offset, forwards matching messages and
//! channel posts to the capture pipeline one at a time, and stops between
//! polls when shutdown is requested.

use super::entities::{attributed_usernames, inbound_from_message};
use super::filter::SourceFilter;
use crate::capture::CaptureService;
use crate::config::TelegramConfig;
use crate::errors::{FeedError, FeedResult};
use crate::logger::{self, LogTag};
use crate::shutdown::ShutdownSignal;
use crate::types::InboundMessage;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, Message, UpdateKind};

/// Slack added to the long-poll timeout for the HTTP client
const HTTP_TIMEOUT_MARGIN_SECS: u64 = 10;

const PREVIEW_CHARS: usize = 80;

pub struct TelegramListener {
    bot: Bot,
    filter: SourceFilter,
    capture: CaptureService,
    poll_timeout_secs: u32,
    retry_delay: Duration,
}

impl TelegramListener {
    pub fn new(config: &TelegramConfig, capture: CaptureService) -> FeedResult<Self> {
        config.validate().map_err(FeedError::Config)?;
        let filter = SourceFilter::from_config(config)?;

        let client = teloxide::net::default_reqwest_settings()
            .timeout(Duration::from_secs(
                config.poll_timeout_secs as u64 + HTTP_TIMEOUT_MARGIN_SECS,
            ))
            .build()
            .map_err(|e| FeedError::Telegram(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            bot: Bot::with_client(config.bot_token.trim(), client),
            filter,
            capture,
            poll_timeout_secs: config.poll_timeout_secs,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        })
    }

    /// Validate the token, then poll until `shutdown` fires
    ///
    /// An invalid token is returned as a `Config` error; everything after
    /// startup is logged and retried.
    pub async fn run(&self, shutdown: Arc<ShutdownSignal>) -> FeedResult<()> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| FeedError::Config(format!("Invalid bot token: {}", e)))?;

        logger::info(
            LogTag::Telegram,
            &format!(
                "Bot validated - @{} (ID: {}), listening to {}",
                me.username.as_deref().unwrap_or("unknown"),
                me.id,
                self.filter.describe()
            ),
        );

        let mut offset: i32 = 0;

        while !shutdown.is_requested() {
            let mut request = self
                .bot
                .get_updates()
                .timeout(self.poll_timeout_secs)
                .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::ChannelPost]);
            if offset > 0 {
                request = request.offset(offset);
            }

            let result = tokio::select! {
                _ = shutdown.wait() => break,
                result = request.send() => result,
            };

            match result {
                Ok(updates) => {
                    for update in updates {
                        offset = update.id.0 as i32 + 1;
                        self.handle_update(update);
                    }
                }
                Err(e) => {
                    logger::warning(
                        LogTag::Telegram,
                        &format!("Poll error (retrying in {:?}): {}", self.retry_delay, e),
                    );
                    tokio::select! {
                        _ = shutdown.wait() => break,
                        _ = tokio::time::sleep(self.retry_delay) => {}
                    }
                }
            }
        }

        logger::info(LogTag::Telegram, "Listener stopped");
        Ok(())
    }

    fn handle_update(&self, update: Update) {
        let message = match update.kind {
            UpdateKind::Message(message) | UpdateKind::ChannelPost(message) => message,
            _ => return,
        };

        deliver(&self.filter, &self.capture, &MessageContext::from_message(&message));
    }
}

/// The parts of a Telegram message the intake path looks at
#[derive(Debug, Clone)]
pub struct MessageContext<'a> {
    pub message_id: i32,
    pub chat_id: i64,
    pub usernames: Vec<&'a str>,
    pub inbound: Option<InboundMessage>,
}

impl<'a> MessageContext<'a> {
    pub fn from_message(message: &'a Message) -> Self {
        Self {
            message_id: message.id.0,
            chat_id: message.chat.id.0,
            usernames: attributed_usernames(message),
            inbound: inbound_from_message(message),
        }
    }

    /// First line of the message text, shortened for log lines
    fn preview(&self) -> String {
        let first_line = self
            .inbound
            .as_ref()
            .and_then(|inbound| inbound.text.lines().find(|l| !l.trim().is_empty()))
            .unwrap_or("");
        let mut preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
        if first_line.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }
}

/// What happened to one incoming message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Ignored,
    NoText,
    Recorded,
    Failed,
}

/// Filter one message and hand it to the capture pipeline
///
/// A capture failure is logged with the message context and reported as
/// `Failed`; the caller moves on to the next update.
pub fn deliver(filter: &SourceFilter, capture: &CaptureService, context: &MessageContext) -> Delivery {
    if !filter.accepts(context.chat_id, &context.usernames) {
        logger::verbose(
            LogTag::Telegram,
            &format!(
                "Ignoring message {} from chat {} ({:?})",
                context.message_id, context.chat_id, context.usernames
            ),
        );
        return Delivery::Ignored;
    }

    let Some(inbound) = &context.inbound else {
        logger::debug(
            LogTag::Telegram,
            &format!("Message {} has no text or caption", context.message_id),
        );
        return Delivery::NoText;
    };

    match capture.handle(inbound) {
        Ok(_) => Delivery::Recorded,
        Err(e) => {
            logger::error(
                LogTag::Capture,
                &format!(
                    "Failed to record message {} from chat {}: {} | \"{}\"",
                    context.message_id,
                    context.chat_id,
                    e,
                    context.preview()
                ),
            );
            Delivery::Failed
        }
    }
}
