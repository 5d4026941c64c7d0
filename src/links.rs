//! Link classification
//!
//! Maps a hyperlink URL onto a canonical category (Transaction, Wallet,
//! Token, chart providers) by ordered substring rules. First match wins and
//! classification is total: a URL no rule recognises is labelled with its
//! visible link text.

use crate::logger::{self, LogTag};
use crate::types::MessageEntity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TRANSACTION: &str = "Transaction";
pub const WALLET: &str = "Wallet";
pub const TOKEN: &str = "Token";

/// Explorer URL used when a token link has to be synthesized
pub const TOKEN_EXPLORER_PREFIX: &str = "https://solscan.io/token/";

/// One substring → category rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRule {
    pub pattern: String,
    pub category: String,
}

impl LinkRule {
    pub fn new(pattern: &str, category: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            category: category.to_string(),
        }
    }
}

/// Default rule table; transaction paths come before generic explorer domains
pub fn default_rules() -> Vec<LinkRule> {
    vec![
        LinkRule::new("solscan.io/tx/", TRANSACTION),
        LinkRule::new("explorer.solana.com/tx/", TRANSACTION),
        LinkRule::new("solscan.io/account/", WALLET),
        LinkRule::new("solscan.io/token/", TOKEN),
        LinkRule::new("birdeye.so", "Birdeye"),
        LinkRule::new("dexscreener.com", "DexScreener"),
        LinkRule::new("dextools.io", "DexTools"),
        LinkRule::new("photon-sol.tinyastro.io", "Photon"),
        LinkRule::new("bullx.io", "Bullx"),
        LinkRule::new("pump.fun", "Pump"),
        LinkRule::new("solscan.io", "Solscan"),
    ]
}

/// Short labels the alert bot prints, mapped to canonical categories
pub fn default_aliases() -> BTreeMap<String, String> {
    [
        ("BE", "Birdeye"),
        ("DS", "DexScreener"),
        ("DT", "DexTools"),
        ("PH", "Photon"),
        ("PF", "Pump"),
        ("Bullx", "Bullx"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Chart providers whose URLs end in the token address
pub const CHART_CATEGORIES: [&str; 3] = ["DexScreener", "DexTools", "Photon"];

#[derive(Debug, Clone)]
pub struct LinkClassifier {
    rules: Vec<LinkRule>,
    aliases: BTreeMap<String, String>,
}

impl Default for LinkClassifier {
    fn default() -> Self {
        Self::new(default_rules(), default_aliases())
    }
}

impl LinkClassifier {
    pub fn new(rules: Vec<LinkRule>, aliases: BTreeMap<String, String>) -> Self {
        Self { rules, aliases }
    }

    pub fn from_config(config: &crate::config::LinksConfig) -> Self {
        Self::new(config.rules.clone(), config.aliases.clone())
    }

    /// Category of the first matching rule, if any
    pub fn match_rule(&self, url: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| !rule.pattern.is_empty() && url.contains(&rule.pattern))
            .map(|rule| rule.category.as_str())
    }

    /// Category for `url`, falling back to the visible text verbatim
    pub fn classify(&self, url: &str, visible_text: &str) -> String {
        match self.match_rule(url) {
            Some(category) => category.to_string(),
            None => visible_text.to_string(),
        }
    }

    /// Like `classify`, but resolves legacy short labels through the alias
    /// table before falling back to the label itself
    pub fn reclassify(&self, url: &str, label: &str) -> String {
        if let Some(category) = self.match_rule(url) {
            return category.to_string();
        }

        self.aliases
            .get(label.trim())
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }

    /// Build the category → URL map for a message's link entities
    ///
    /// Later entities overwrite earlier ones with the same category.
    pub fn collect(&self, text: &str, entities: &[MessageEntity]) -> BTreeMap<String, String> {
        let mut links = BTreeMap::new();

        for entity in entities.iter().filter(|e| e.kind.is_link()) {
            let Some(visible) = entity.visible_text(text) else {
                logger::debug(
                    LogTag::Links,
                    &format!(
                        "Skipping entity outside text (offset={}, length={})",
                        entity.offset, entity.length
                    ),
                );
                continue;
            };

            let Some(url) = entity.link_target(text) else {
                continue;
            };

            let category = self.classify(&url, visible.trim());
            logger::verbose(LogTag::Links, &format!("{} -> {}", url, category));
            links.insert(category, url);
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_paths_before_generic_domain() {
        let classifier = LinkClassifier::default();
        assert_eq!(classifier.classify("https://solscan.io/tx/5abc", "TX"), TRANSACTION);
        assert_eq!(classifier.classify("https://solscan.io/account/Wal1", "W"), WALLET);
        assert_eq!(classifier.classify("https://solscan.io/token/Mint1", "T"), TOKEN);
        assert_eq!(classifier.classify("https://solscan.io/block/1", "B"), "Solscan");
    }

    #[test]
    fn test_chart_providers() {
        let classifier = LinkClassifier::default();
        assert_eq!(classifier.classify("https://birdeye.so/token/X?chain=solana", "BE"), "Birdeye");
        assert_eq!(classifier.classify("https://dexscreener.com/solana/X", "DS"), "DexScreener");
        assert_eq!(classifier.classify("https://www.dextools.io/app/solana/pair-explorer/X", "DT"), "DexTools");
        assert_eq!(classifier.classify("https://photon-sol.tinyastro.io/en/lp/X", "PH"), "Photon");
        assert_eq!(classifier.classify("https://bullx.io/terminal?address=X", "Bullx"), "Bullx");
        assert_eq!(classifier.classify("https://pump.fun/X", "PF"), "Pump");
    }

    #[test]
    fn test_unmatched_url_uses_visible_text() {
        let classifier = LinkClassifier::default();
        assert_eq!(classifier.classify("https://t.me/somegroup", "Chat"), "Chat");
        assert_eq!(classifier.classify("", ""), "");
    }

    #[test]
    fn test_first_rule_wins() {
        let classifier = LinkClassifier::new(
            vec![LinkRule::new("example.com", "First"), LinkRule::new("example.com/tx", "Second")],
            BTreeMap::new(),
        );
        assert_eq!(classifier.classify("https://example.com/tx/1", "x"), "First");
    }

    #[test]
    fn test_reclassify_resolves_aliases() {
        let classifier = LinkClassifier::default();
        assert_eq!(classifier.reclassify("https://t.me/x", "DS"), "DexScreener");
        assert_eq!(classifier.reclassify("https://t.me/x", "DexScreener"), "DexScreener");
        assert_eq!(classifier.reclassify("https://t.me/x", "Chat"), "Chat");
        assert_eq!(classifier.reclassify("https://solscan.io/tx/1", "DS"), TRANSACTION);
    }

    #[test]
    fn test_collect_last_write_wins() {
        let classifier = LinkClassifier::default();
        let text = "TX | TX2";
        let entities = vec![
            MessageEntity::text_url(0, 2, "https://solscan.io/tx/first"),
            MessageEntity::text_url(5, 3, "https://solscan.io/tx/second"),
        ];
        let links = classifier.collect(text, &entities);
        assert_eq!(links.len(), 1);
        assert_eq!(links[TRANSACTION], "https://solscan.io/tx/second");
    }

    #[test]
    fn test_collect_skips_non_links_and_bad_offsets() {
        let classifier = LinkClassifier::default();
        let text = "BE";
        let mut bold = MessageEntity::text_url(0, 2, "https://birdeye.so/x");
        bold.kind = crate::types::EntityKind::Bold;
        let entities = vec![bold, MessageEntity::text_url(10, 2, "https://birdeye.so/y")];
        assert!(classifier.collect(text, &entities).is_empty());
    }
}
