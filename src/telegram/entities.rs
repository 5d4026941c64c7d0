//! Conversion from teloxide messages to the feed's own types

use crate::types::{EntityKind, InboundMessage, MessageEntity};
use teloxide::types::{Message, MessageEntity as TgEntity, MessageEntityKind};

pub fn convert_entity(entity: &TgEntity) -> MessageEntity {
    let (kind, url) = match &entity.kind {
        MessageEntityKind::TextLink { url } => (EntityKind::TextUrl, Some(url.to_string())),
        MessageEntityKind::Url => (EntityKind::Url, None),
        MessageEntityKind::Mention => (EntityKind::Mention, None),
        MessageEntityKind::Hashtag => (EntityKind::Hashtag, None),
        MessageEntityKind::Cashtag => (EntityKind::Cashtag, None),
        MessageEntityKind::Bold => (EntityKind::Bold, None),
        MessageEntityKind::Italic => (EntityKind::Italic, None),
        MessageEntityKind::Code => (EntityKind::Code, None),
        MessageEntityKind::Pre { .. } => (EntityKind::Pre, None),
        _ => (EntityKind::Other, None),
    };

    MessageEntity {
        offset: entity.offset,
        length: entity.length,
        kind,
        url,
    }
}

/// Text (or media caption) with its entities; `None` for messages without either
pub fn inbound_from_message(message: &Message) -> Option<InboundMessage> {
    let (text, entities) = match (message.text(), message.caption()) {
        (Some(text), _) => (text, message.entities()),
        (None, Some(caption)) => (caption, message.caption_entities()),
        (None, None) => return None,
    };

    let entities = entities
        .unwrap_or_default()
        .iter()
        .map(convert_entity)
        .collect();

    Some(InboundMessage::new(text, entities))
}

/// Every username the message can be attributed to
pub fn attributed_usernames(message: &Message) -> Vec<&str> {
    let mut names = Vec::new();

    if let Some(username) = message.from.as_ref().and_then(|u| u.username.as_deref()) {
        names.push(username);
    }
    if let Some(username) = message.via_bot.as_ref().and_then(|u| u.username.as_deref()) {
        names.push(username);
    }
    if let Some(username) = message.sender_chat.as_ref().and_then(|c| c.username()) {
        names.push(username);
    }
    if message.chat.is_channel() {
        if let Some(username) = message.chat.username() {
            names.push(username);
        }
    }

    names
}
