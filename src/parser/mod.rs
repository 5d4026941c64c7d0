//! Trade alert parser
//!
//! Turns an alert body plus its link entities into a `TradeRecord`. Every
//! rule is best-effort: a rule that does not match leaves its field empty and
//! parsing never fails. The output depends only on the text, the entities
//! and the classifier tables.

pub mod patterns;

pub use patterns::{PatternSet, PATTERN_SET_VERSION};

use crate::links::LinkClassifier;
use crate::logger::{self, LogTag};
use crate::types::{MessageEntity, TradeRecord};

#[derive(Clone)]
pub struct TradeParser {
    patterns: &'static PatternSet,
    classifier: LinkClassifier,
}

impl Default for TradeParser {
    fn default() -> Self {
        Self::new(LinkClassifier::default())
    }
}

impl TradeParser {
    pub fn new(classifier: LinkClassifier) -> Self {
        Self {
            patterns: PatternSet::current(),
            classifier,
        }
    }

    /// Parse one alert; the returned record has an empty timestamp, the
    /// capture pipeline stamps it
    pub fn parse(&self, text: &str, entities: &[MessageEntity]) -> TradeRecord {
        let p = self.patterns;
        let mut record = TradeRecord::empty(text, "");

        if let Some((action, at)) = p.action(text) {
            record.action = Some(action.marker().to_string());
            if action.has_token() {
                let (token, platform) = p.token_platform(&text[at..]);
                record.token = token;
                record.platform = platform;
            }
        }

        // Details are searched from the wallet section onwards
        let details_scope = match p.wallet(text) {
            Some((wallet, at)) => {
                record.wallet = Some(wallet);
                &text[at..]
            }
            None => text,
        };
        record.details = p.details(details_scope);

        record.holdings = p.holdings(text);
        record.pnl = p.pnl(text);
        record.market_cap = p.market_cap(text);
        record.seen_time = p.seen_time(text);
        record.contract = p.contract(text);
        record.links = self.classifier.collect(text, entities);

        let unmatched = unmatched_fields(&record);
        if !unmatched.is_empty() {
            logger::debug(
                LogTag::Parser,
                &format!(
                    "Pattern set v{}: no match for {}",
                    PATTERN_SET_VERSION,
                    unmatched.join(", ")
                ),
            );
        }

        record
    }
}

/// Names of the extracted fields that stayed empty
pub fn unmatched_fields(record: &TradeRecord) -> Vec<&'static str> {
    [
        ("action", record.action.is_none()),
        ("token", record.token.is_none()),
        ("platform", record.platform.is_none()),
        ("wallet", record.wallet.is_none()),
        ("details", record.details.is_none()),
        ("holdings", record.holdings.is_none()),
        ("pnl", record.pnl.is_none()),
        ("market_cap", record.market_cap.is_none()),
        ("seen_time", record.seen_time.is_none()),
        ("contract", record.contract.is_none()),
    ]
    .into_iter()
    .filter(|(_, missing)| *missing)
    .map(|(name, _)| name)
    .collect()
}

/// Parse with the default rule and classifier tables
pub fn parse_trade_message(text: &str, entities: &[MessageEntity]) -> TradeRecord {
    TradeParser::default().parse(text, entities)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::types::TradeAction;

    #[test]
    fn test_buy_alert_fields() {
        let text = buy_alert();
        let record = parse_trade_message(&text, &buy_alert_entities(&text));

        assert_eq!(record.action.as_deref(), Some("🟢 BUY"));
        assert_eq!(record.trade_action(), Some(TradeAction::Buy));
        assert_eq!(record.token.as_deref(), Some("FOO"));
        assert_eq!(record.platform.as_deref(), Some("Raydium"));
        assert_eq!(record.wallet.as_deref(), Some("WalletX"));
        assert_eq!(
            record.details.as_deref(),
            Some("swapped 1.5 SOL for 1,000,000 FOO @$0.0000123")
        );
        assert_eq!(record.holdings.as_deref(), Some("1,000,000 FOO (100%)"));
        assert_eq!(record.pnl.as_deref(), Some("+20%"));
        assert_eq!(record.market_cap.as_deref(), Some("12.3K"));
        assert_eq!(record.seen_time.as_deref(), Some("2m"));
        assert_eq!(record.contract.as_deref(), Some(CONTRACT));
        assert_eq!(record.original_text, text);
    }

    #[test]
    fn test_buy_alert_links() {
        let text = buy_alert();
        let record = parse_trade_message(&text, &buy_alert_entities(&text));

        assert_eq!(record.links["Wallet"], "https://solscan.io/account/WaLLetXaddr");
        assert_eq!(record.links["Transaction"], "https://solscan.io/tx/5sigABC");
        assert_eq!(record.links["Token"], format!("https://solscan.io/token/{}", CONTRACT));
        for category in ["Birdeye", "DexScreener", "DexTools", "Photon", "Bullx"] {
            assert!(record.links.contains_key(category), "missing {}", category);
        }
        assert_eq!(record.links.len(), 8);
    }

    #[test]
    fn test_compact_example() {
        let text = format!(
            "🟢 BUY FOO on Raydium\n🔹 WalletX\n...swapped 1 SOL for FOO...\n✊Holds: 100 FOO\n📈PnL: +20%\n🔗 ... | MC: $12.3K | Seen: 2m\n{}",
            "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789abcd"
        );
        let record = parse_trade_message(&text, &[]);

        assert_eq!(record.action.as_deref(), Some("🟢 BUY"));
        assert_eq!(record.token.as_deref(), Some("FOO"));
        assert_eq!(record.platform.as_deref(), Some("Raydium"));
        assert_eq!(record.wallet.as_deref(), Some("WalletX"));
        assert_eq!(record.details.as_deref(), Some("swapped 1 SOL for FOO..."));
        assert_eq!(record.holdings.as_deref(), Some("100 FOO"));
        assert_eq!(record.market_cap.as_deref(), Some("12.3K"));
        assert_eq!(record.seen_time.as_deref(), Some("2m"));
        assert_eq!(record.contract.as_deref(), Some("ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789abcd"));
        assert!(record.links.is_empty());
    }

    #[test]
    fn test_no_marker_leaves_action_fields_empty() {
        let text = "gm, nothing to trade today\n🔹 SomeWallet";
        let record = parse_trade_message(text, &[]);

        assert!(record.action.is_none());
        assert!(record.token.is_none());
        assert!(record.platform.is_none());
        assert_eq!(record.wallet.as_deref(), Some("SomeWallet"));
        assert_eq!(record.original_text, text);
    }

    #[test]
    fn test_transfer_has_no_token() {
        let text = "💸 TRANSFER\n🔹 Whale 7\n\n🔹 Whale 7 transferred 250 SOL to\nAbCdEf\n🔗 #SOL | MC: $1.2B | Seen: 1h";
        let record = parse_trade_message(text, &[]);

        assert_eq!(record.trade_action(), Some(TradeAction::Transfer));
        assert!(record.token.is_none());
        assert!(record.platform.is_none());
        assert_eq!(record.wallet.as_deref(), Some("Whale 7"));
        assert_eq!(record.details.as_deref(), Some("transferred 250 SOL to\nAbCdEf"));
        assert_eq!(record.market_cap.as_deref(), Some("1.2B"));
        assert!(record.contract.is_none());
    }

    #[test]
    fn test_sell_with_loss_marker() {
        let text = "🔴 SELL BAR\n🔹 Degen\n\n🔹 Degen swapped 5,000 BAR for 0.2 SOL\n📉PnL: -35%";
        let record = parse_trade_message(text, &[]);

        assert_eq!(record.token.as_deref(), Some("BAR"));
        assert!(record.platform.is_none());
        assert_eq!(record.pnl.as_deref(), Some("-35%"));
        assert!(record.holdings.is_none());
        assert_eq!(record.details.as_deref(), Some("swapped 5,000 BAR for 0.2 SOL"));
    }

    #[test]
    fn test_token_without_trailing_punctuation() {
        let record = parse_trade_message("🟢 BUY FOO, on Raydium\n🔹 W", &[]);
        assert_eq!(record.token.as_deref(), Some("FOO"));
        assert_eq!(record.wallet.as_deref(), Some("W"));
    }

    #[test]
    fn test_unmatched_fields() {
        let text = buy_alert();
        let full = parse_trade_message(&text, &buy_alert_entities(&text));
        assert!(unmatched_fields(&full).is_empty());

        let sparse = parse_trade_message("💸 TRANSFER\n🔹 W transferred 1 SOL", &[]);
        assert_eq!(
            unmatched_fields(&sparse),
            vec!["token", "platform", "holdings", "pnl", "market_cap", "seen_time", "contract"]
        );
    }

    #[test]
    fn test_empty_message() {
        let record = parse_trade_message("", &[]);
        assert_eq!(record, crate::types::TradeRecord::empty("", ""));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = buy_alert();
        let entities = buy_alert_entities(&text);
        let first = serde_json::to_string(&parse_trade_message(&text, &entities)).unwrap();
        for _ in 0..5 {
            let again = serde_json::to_string(&parse_trade_message(&text, &entities)).unwrap();
            assert_eq!(first, again);
        }
    }
}
