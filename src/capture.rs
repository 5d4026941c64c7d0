//! Capture pipeline: raw append, parse, parsed append
//!
//! One inbound message is handled to completion before the next. The raw
//! capture and the parsed record share the same timestamp so the repair
//! pass can join them later.

use crate::config::Config;
use crate::errors::FeedResult;
use crate::links::LinkClassifier;
use crate::logger::{self, LogTag};
use crate::parser::TradeParser;
use crate::store::JsonArrayStore;
use crate::types::{capture_timestamp, InboundMessage, RawCapture, TradeRecord};

pub struct CaptureService {
    raw_store: JsonArrayStore,
    parsed_store: JsonArrayStore,
    parser: TradeParser,
    dry_run: bool,
}

impl CaptureService {
    pub fn new(raw_store: JsonArrayStore, parsed_store: JsonArrayStore, parser: TradeParser) -> Self {
        Self {
            raw_store,
            parsed_store,
            parser,
            dry_run: false,
        }
    }

    /// Service wired from the storage and link sections of `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            JsonArrayStore::new(config.storage.raw_path()),
            JsonArrayStore::new(config.storage.parsed_path()),
            TradeParser::new(LinkClassifier::from_config(&config.links)),
        )
    }

    /// Parse and log without touching the store files
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn raw_store(&self) -> &JsonArrayStore {
        &self.raw_store
    }

    pub fn parsed_store(&self) -> &JsonArrayStore {
        &self.parsed_store
    }

    /// Persist, parse and persist one message
    pub fn handle(&self, message: &InboundMessage) -> FeedResult<TradeRecord> {
        let timestamp = capture_timestamp();
        self.handle_at(message, &timestamp)
    }

    /// `handle` with an explicit timestamp
    pub fn handle_at(&self, message: &InboundMessage, timestamp: &str) -> FeedResult<TradeRecord> {
        let raw = RawCapture::from_message(message, timestamp);
        if !self.dry_run {
            self.raw_store.append(&raw)?;
        }

        let mut record = self.parser.parse(&message.text, &message.entities);
        record.timestamp = timestamp.to_string();

        if !self.dry_run {
            self.parsed_store.append(&record)?;
        }

        logger::info(LogTag::Capture, &summarize(&record));
        if let Ok(json) = serde_json::to_string_pretty(&record) {
            logger::debug(LogTag::Capture, &format!("Parsed record:\n{}", json));
        }

        Ok(record)
    }
}

/// One-line description of a parsed record for the console
pub fn summarize(record: &TradeRecord) -> String {
    let action = record.action.as_deref().unwrap_or("(no action)");
    let mut line = action.to_string();

    if let Some(token) = &record.token {
        line.push(' ');
        line.push_str(token);
    }
    if let Some(platform) = &record.platform {
        line.push_str(&format!(" on {}", platform));
    }
    if let Some(wallet) = &record.wallet {
        line.push_str(&format!(" | wallet {}", wallet));
    }
    if let Some(mc) = &record.market_cap {
        line.push_str(&format!(" | MC {}", mc));
    }
    line.push_str(&format!(" | {} links", record.links.len()));

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::test_support::{buy_alert, buy_alert_entities};
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> CaptureService {
        CaptureService::new(
            JsonArrayStore::new(dir.path().join("raw.json")),
            JsonArrayStore::new(dir.path().join("parsed.json")),
            TradeParser::default(),
        )
    }

    #[test]
    fn test_handle_appends_both_with_shared_timestamp() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let text = buy_alert();
        let message = InboundMessage::new(text.clone(), buy_alert_entities(&text));

        let record = service.handle(&message).unwrap();
        service.handle(&InboundMessage::new("gm", vec![])).unwrap();

        let raw: Vec<RawCapture> = service.raw_store().read_all().unwrap();
        let parsed: Vec<TradeRecord> = service.parsed_store().read_all().unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(parsed.len(), 2);

        assert_eq!(raw[0].timestamp, record.timestamp);
        assert_eq!(parsed[0], record);
        assert_eq!(raw[0].message, text);
        assert_eq!(raw[0].entities.len(), 8);

        // Arrival order preserved
        assert_eq!(parsed[1].original_text, "gm");
        assert!(parsed[1].action.is_none());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir).with_dry_run(true);

        let record = service.handle_at(&InboundMessage::new("🔴 SELL BAR", vec![]), "t1").unwrap();
        assert_eq!(record.token.as_deref(), Some("BAR"));
        assert_eq!(record.timestamp, "t1");
        assert!(!dir.path().join("raw.json").exists());
        assert!(!dir.path().join("parsed.json").exists());
    }

    #[test]
    fn test_summarize() {
        let text = buy_alert();
        let record = TradeParser::default().parse(&text, &buy_alert_entities(&text));
        assert_eq!(
            summarize(&record),
            "🟢 BUY FOO on Raydium | wallet WalletX | MC 12.3K | 8 links"
        );
        assert_eq!(summarize(&TradeRecord::empty("", "")), "(no action) | 0 links");
    }
}
