//! Extraction patterns for the alert bot's message format
//!
//! Everything that depends on the bot's formatting lives here. When the
//! format changes, add a new pattern set and bump `PATTERN_SET_VERSION`;
//! the parser and the repair pass only talk to `PatternSet`.

use crate::types::TradeAction;
use once_cell::sync::Lazy;
use regex::Regex;

/// Version tag of the current rule table
pub const PATTERN_SET_VERSION: &str = "2";

/// Marketing words the bot sometimes prints after the contract address
pub const CONTRACT_SUFFIX_WORDS: [&str; 2] = ["pump", "bonk"];

/// Minimum length of a contract address line
pub const CONTRACT_MIN_LEN: usize = 32;

/// Compiled extraction rules
pub struct PatternSet {
    action: Regex,
    token_platform: Regex,
    wallet: Regex,
    details: Regex,
    holdings: Regex,
    pnl: Regex,
    market_cap: Regex,
    seen_time: Regex,
    contract_line: Regex,
}

static CURRENT: Lazy<PatternSet> = Lazy::new(PatternSet::build_current);

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid extraction pattern")
}

/// Trim and drop empty captures
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl PatternSet {
    /// The rule table in use for new captures and repairs
    pub fn current() -> &'static PatternSet {
        &CURRENT
    }

    fn build_current() -> PatternSet {
        let markers = TradeAction::ALL
            .iter()
            .map(|action| regex::escape(action.marker()))
            .collect::<Vec<_>>()
            .join("|");

        let token_markers = [TradeAction::Buy, TradeAction::Sell]
            .iter()
            .map(|action| regex::escape(action.marker()))
            .collect::<Vec<_>>()
            .join("|");

        let suffixes = CONTRACT_SUFFIX_WORDS.join("|");

        PatternSet {
            action: compile(&format!("({})", markers)),
            token_platform: compile(&format!(
                r"^(?:{})[ \t]+(\w+)(?:[ \t]+on[ \t]+(\w+(?:[ \t]+\w+)?))?",
                token_markers
            )),
            wallet: compile(r"🔹[ \t]*([^\n]*)"),
            details: compile(r"(?s)((?:swapped|transferred)\b.*?)(?:\n[ \t]*(?:✊|📈|📉|🔗)|\z)"),
            holdings: compile(r"✊[ \t]*Holds:[ \t]*([^\n]*)"),
            pnl: compile(r"(?:📈|📉)[ \t]*PnL:[ \t]*([^\n]*)"),
            market_cap: compile(r"MC:[ \t]*\$?[ \t]*([0-9][0-9,]*(?:\.[0-9]+)?[KMBkmb]?)"),
            seen_time: compile(r"Seen:[ \t]*([^|:\n]*)"),
            contract_line: compile(&format!(
                r"^([A-Za-z0-9]{{{},}})(?:[ \t]+(?:{}))?$",
                CONTRACT_MIN_LEN, suffixes
            )),
        }
    }

    /// First action marker and its byte offset
    pub fn action(&self, text: &str) -> Option<(TradeAction, usize)> {
        let m = self.action.find(text)?;
        TradeAction::from_marker(m.as_str()).map(|action| (action, m.start()))
    }

    /// Token and optional platform, matched at the action marker
    pub fn token_platform(&self, from_marker: &str) -> (Option<String>, Option<String>) {
        match self.token_platform.captures(from_marker) {
            Some(caps) => (
                caps.get(1).and_then(|m| non_empty(m.as_str())),
                caps.get(2).and_then(|m| non_empty(m.as_str())),
            ),
            None => (None, None),
        }
    }

    /// Wallet label and the byte offset of its section marker
    pub fn wallet(&self, text: &str) -> Option<(String, usize)> {
        let caps = self.wallet.captures(text)?;
        let start = caps.get(0)?.start();
        non_empty(caps.get(1)?.as_str()).map(|wallet| (wallet, start))
    }

    /// Swap/transfer narrative, up to the next section marker line
    pub fn details(&self, text: &str) -> Option<String> {
        let caps = self.details.captures(text)?;
        non_empty(caps.get(1)?.as_str())
    }

    pub fn holdings(&self, text: &str) -> Option<String> {
        non_empty(self.holdings.captures(text)?.get(1)?.as_str())
    }

    pub fn pnl(&self, text: &str) -> Option<String> {
        non_empty(self.pnl.captures(text)?.get(1)?.as_str())
    }

    /// Numeric market cap with suffix; currency sign and ":BE" are dropped
    pub fn market_cap(&self, text: &str) -> Option<String> {
        non_empty(self.market_cap.captures(text)?.get(1)?.as_str())
    }

    pub fn seen_time(&self, text: &str) -> Option<String> {
        non_empty(self.seen_time.captures(text)?.get(1)?.as_str())
    }

    /// Contract address from the last non-empty line
    pub fn contract(&self, text: &str) -> Option<String> {
        let last_line = text.lines().map(str::trim).filter(|l| !l.is_empty()).last()?;
        let caps = self.contract_line.captures(last_line)?;
        caps.get(1).map(|m| m.as_str().to_string())
    }

    /// Whether a string looks like a contract address
    pub fn is_contract_like(&self, value: &str) -> bool {
        value.len() >= CONTRACT_MIN_LEN && value.chars().all(|c| c.is_ascii_alphanumeric())
    }
}
