use crate::config::TelegramConfig;
use crate::errors::{FeedError, FeedResult};

/// Which chats and senders the listener accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    chat_id: Option<i64>,
    username: Option<String>,
}

impl SourceFilter {
    pub fn new(chat_id: Option<i64>, username: Option<&str>) -> Self {
        Self {
            chat_id,
            username: username
                .map(|u| u.trim().trim_start_matches('@').to_lowercase())
                .filter(|u| !u.is_empty()),
        }
    }

    pub fn from_config(config: &TelegramConfig) -> FeedResult<Self> {
        let chat_id = config.parsed_chat_id().map_err(FeedError::Config)?;
        Ok(Self {
            chat_id,
            username: config.normalized_username(),
        })
    }

    /// Both configured conditions must hold; an unset condition accepts all
    ///
    /// `usernames` are every name the message can be attributed to (sender,
    /// inline bot, sender chat, channel).
    pub fn accepts(&self, chat_id: i64, usernames: &[&str]) -> bool {
        if let Some(expected) = self.chat_id {
            if expected != chat_id {
                return false;
            }
        }

        match &self.username {
            Some(expected) => usernames
                .iter()
                .any(|name| name.trim_start_matches('@').eq_ignore_ascii_case(expected)),
            None => true,
        }
    }

    pub fn describe(&self) -> String {
        let chat = self
            .chat_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "any chat".to_string());
        let sender = self
            .username
            .as_ref()
            .map(|u| format!("@{}", u))
            .unwrap_or_else(|| "any sender".to_string());
        format!("{} / {}", chat, sender)
    }
}
