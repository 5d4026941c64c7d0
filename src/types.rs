/// Core data types: inbound messages, raw captures and parsed trade records
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timestamp format shared by raw captures and parsed records
pub const CAPTURE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current local time in the capture timestamp format
pub fn capture_timestamp() -> String {
    Local::now().naive_local().format(CAPTURE_TIMESTAMP_FORMAT).to_string()
}

// ============================================================================
// ENTITIES
// ============================================================================

/// Rich-text annotation kinds, serialized with Telegram's type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "MessageEntityTextUrl")]
    TextUrl,
    #[serde(rename = "MessageEntityUrl")]
    Url,
    #[serde(rename = "MessageEntityMention")]
    Mention,
    #[serde(rename = "MessageEntityHashtag")]
    Hashtag,
    #[serde(rename = "MessageEntityCashtag")]
    Cashtag,
    #[serde(rename = "MessageEntityBold")]
    Bold,
    #[serde(rename = "MessageEntityItalic")]
    Italic,
    #[serde(rename = "MessageEntityCode")]
    Code,
    #[serde(rename = "MessageEntityPre")]
    Pre,
    #[serde(other)]
    Other,
}

impl EntityKind {
    /// Entities that denote a clickable link
    pub fn is_link(&self) -> bool {
        matches!(self, EntityKind::TextUrl | EntityKind::Url)
    }
}

/// A (offset, length, url) annotation; offsets are UTF-16 code units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntity {
    pub offset: usize,
    pub length: usize,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl MessageEntity {
    pub fn text_url(offset: usize, length: usize, url: &str) -> Self {
        Self {
            offset,
            length,
            kind: EntityKind::TextUrl,
            url: Some(url.to_string()),
        }
    }

    /// Visible text covered by this entity, `None` when out of range
    pub fn visible_text<'a>(&self, text: &'a str) -> Option<&'a str> {
        utf16_slice(text, self.offset, self.length)
    }

    /// Link target: explicit URL for text links, the visible text for bare URLs
    pub fn link_target(&self, text: &str) -> Option<String> {
        match self.kind {
            EntityKind::TextUrl => self.url.clone(),
            EntityKind::Url => self
                .url
                .clone()
                .or_else(|| self.visible_text(text).map(|s| s.to_string())),
            _ => None,
        }
    }
}

/// Slice `text` by UTF-16 offset/length, `None` if the range does not land
/// on character boundaries inside the text
pub fn utf16_slice(text: &str, offset: usize, length: usize) -> Option<&str> {
    let end_units = offset.checked_add(length)?;
    let mut units = 0usize;
    let mut start_byte = None;
    let mut end_byte = None;

    for (byte_idx, ch) in text.char_indices() {
        if units == offset && start_byte.is_none() {
            start_byte = Some(byte_idx);
        }
        if units == end_units {
            end_byte = Some(byte_idx);
            break;
        }
        units += ch.len_utf16();
    }

    if units == offset && start_byte.is_none() {
        start_byte = Some(text.len());
    }
    if units == end_units && end_byte.is_none() {
        end_byte = Some(text.len());
    }

    match (start_byte, end_byte) {
        (Some(start), Some(end)) if start <= end => Some(&text[start..end]),
        _ => None,
    }
}

// ============================================================================
// MESSAGES & CAPTURES
// ============================================================================

/// One message as delivered by the listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub text: String,
    pub entities: Vec<MessageEntity>,
}

impl InboundMessage {
    pub fn new(text: impl Into<String>, entities: Vec<MessageEntity>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }
}

/// Raw capture persisted before parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCapture {
    pub message: String,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    pub timestamp: String,
}

impl RawCapture {
    pub fn from_message(message: &InboundMessage, timestamp: &str) -> Self {
        Self {
            message: message.text.clone(),
            entities: message.entities.clone(),
            timestamp: timestamp.to_string(),
        }
    }
}

// ============================================================================
// TRADE RECORDS
// ============================================================================

/// Trade action identified by its leading marker phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeAction {
    Buy,
    Sell,
    Transfer,
    Swap,
}

impl TradeAction {
    pub const ALL: [TradeAction; 4] = [
        TradeAction::Buy,
        TradeAction::Sell,
        TradeAction::Transfer,
        TradeAction::Swap,
    ];

    /// Marker phrase as it appears in the alert text
    pub fn marker(&self) -> &'static str {
        match self {
            TradeAction::Buy => "🟢 BUY",
            TradeAction::Sell => "🔴 SELL",
            TradeAction::Transfer => "💸 TRANSFER",
            TradeAction::Swap => "🔁 SWAP",
        }
    }

    pub fn from_marker(marker: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.marker() == marker)
    }

    /// Token and platform are only reported for Buy/Sell alerts
    pub fn has_token(&self) -> bool {
        matches!(self, TradeAction::Buy | TradeAction::Sell)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
            TradeAction::Transfer => "transfer",
            TradeAction::Swap => "swap",
        }
    }

    /// Case-insensitive parse of "buy"/"sell"/"transfer"/"swap"
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|action| action.as_str() == name)
    }
}

/// Parsed trade alert
///
/// `original_text` and `timestamp` are always present; every other field is
/// `None` (or empty) when the source text did not carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub wallet: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub holdings: Option<String>,
    #[serde(default)]
    pub pnl: Option<String>,
    #[serde(default, alias = "marketCap")]
    pub market_cap: Option<String>,
    #[serde(default, alias = "seenTime")]
    pub seen_time: Option<String>,
    #[serde(default)]
    pub links: BTreeMap<String, String>,
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(alias = "originalText")]
    pub original_text: String,
    #[serde(default)]
    pub timestamp: String,
}

impl TradeRecord {
    /// Record with every extracted field empty
    pub fn empty(original_text: &str, timestamp: &str) -> Self {
        Self {
            action: None,
            token: None,
            platform: None,
            wallet: None,
            details: None,
            holdings: None,
            pnl: None,
            market_cap: None,
            seen_time: None,
            links: BTreeMap::new(),
            contract: None,
            original_text: original_text.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    /// Typed view of the action marker
    pub fn trade_action(&self) -> Option<TradeAction> {
        self.action.as_deref().and_then(TradeAction::from_marker)
    }

    /// Mutable references to every free-text field, used by repair passes
    pub fn text_fields_mut(&mut self) -> Vec<&mut Option<String>> {
        vec![
            &mut self.action,
            &mut self.token,
            &mut self.platform,
            &mut self.wallet,
            &mut self.details,
            &mut self.holdings,
            &mut self.pnl,
            &mut self.market_cap,
            &mut self.seen_time,
            &mut self.contract,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_slice_with_emoji() {
        // "🔗" is two UTF-16 units
        let text = "🔗 BE | DS";
        assert_eq!(utf16_slice(text, 3, 2), Some("BE"));
        assert_eq!(utf16_slice(text, 8, 2), Some("DS"));
        assert_eq!(utf16_slice(text, 0, 2), Some("🔗"));
    }

    #[test]
    fn test_utf16_slice_out_of_range() {
        assert_eq!(utf16_slice("abc", 2, 5), None);
        assert_eq!(utf16_slice("abc", 3, 0), Some(""));
        // Splitting a surrogate pair is rejected
        assert_eq!(utf16_slice("🔗x", 1, 2), None);
    }

    #[test]
    fn test_entity_kind_names() {
        let entity = MessageEntity::text_url(0, 2, "https://dexscreener.com/solana/abc");
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "MessageEntityTextUrl");

        let unknown: MessageEntity =
            serde_json::from_str(r#"{"offset":0,"length":1,"type":"MessageEntitySpoiler"}"#).unwrap();
        assert_eq!(unknown.kind, EntityKind::Other);
        assert!(unknown.url.is_none());
    }

    #[test]
    fn test_bare_url_target_falls_back_to_text() {
        let text = "see https://birdeye.so/token/x now";
        let entity = MessageEntity {
            offset: 4,
            length: 26,
            kind: EntityKind::Url,
            url: None,
        };
        assert_eq!(entity.link_target(text), Some("https://birdeye.so/token/x".to_string()));
    }

    #[test]
    fn test_trade_action_markers() {
        for action in TradeAction::ALL {
            assert_eq!(TradeAction::from_marker(action.marker()), Some(action));
            assert_eq!(TradeAction::from_name(action.as_str()), Some(action));
        }
        assert!(TradeAction::Buy.has_token());
        assert!(!TradeAction::Swap.has_token());
        assert_eq!(TradeAction::from_marker("🟢 HOLD"), None);
    }

    #[test]
    fn test_record_reads_camel_case_keys() {
        let record: TradeRecord = serde_json::from_str(
            r#"{"marketCap":"12.3K","seenTime":"2m","originalText":"hi","timestamp":"t"}"#,
        )
        .unwrap();
        assert_eq!(record.market_cap.as_deref(), Some("12.3K"));
        assert_eq!(record.seen_time.as_deref(), Some("2m"));
        assert_eq!(record.original_text, "hi");
        assert!(record.links.is_empty());
    }

    #[test]
    fn test_capture_timestamp_format() {
        let ts = capture_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, CAPTURE_TIMESTAMP_FORMAT).is_ok());
    }
}
