//! Offline repair of stored trade records
//!
//! Joins parsed records to their raw captures by timestamp and brings old
//! records up to the current extraction rules:
//! - marker emoji restored in every text field (`emoji::fix_emojis`)
//! - `contract` and `seen_time` re-derived from the repaired raw text
//! - free-text fields trimmed, empty values dropped
//! - links reclassified; a missing contract is recovered from chart links and
//!   a Token link synthesized from the contract
//!
//! The inputs are never modified and the pass is idempotent.

pub mod emoji;

pub use emoji::fix_emojis;

use crate::errors::{FeedError, FeedResult};
use crate::links::{LinkClassifier, CHART_CATEGORIES, TOKEN, TOKEN_EXPLORER_PREFIX};
use crate::logger::{self, LogTag};
use crate::parser::PatternSet;
use crate::store::JsonArrayStore;
use crate::types::{RawCapture, TradeRecord};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Counters reported by the repair tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairSummary {
    pub records: usize,
    pub matched_raw: usize,
    pub changed: usize,
    pub contracts_recovered: usize,
    pub token_links_added: usize,
}

/// Repair `parsed` against `raw`, returning new records in the same order
pub fn repair(
    parsed: &[TradeRecord],
    raw: &[RawCapture],
    classifier: &LinkClassifier,
) -> Vec<TradeRecord> {
    repair_with_summary(parsed, raw, classifier).0
}

pub fn repair_with_summary(
    parsed: &[TradeRecord],
    raw: &[RawCapture],
    classifier: &LinkClassifier,
) -> (Vec<TradeRecord>, RepairSummary) {
    let patterns = PatternSet::current();

    // Duplicate timestamps: the last capture wins
    let raw_by_timestamp: HashMap<&str, &RawCapture> = raw
        .iter()
        .map(|capture| (capture.timestamp.as_str(), capture))
        .collect();

    let mut summary = RepairSummary {
        records: parsed.len(),
        ..Default::default()
    };

    let repaired = parsed
        .iter()
        .map(|record| {
            let capture = raw_by_timestamp.get(record.timestamp.as_str()).copied();
            if capture.is_some() {
                summary.matched_raw += 1;
            }

            let fixed = repair_record(record, capture, patterns, classifier);

            if fixed.contract.is_some() && record.contract.is_none() {
                summary.contracts_recovered += 1;
            }
            if fixed.links.contains_key(TOKEN) && !record.links.contains_key(TOKEN) {
                summary.token_links_added += 1;
            }
            if &fixed != record {
                summary.changed += 1;
                logger::debug(
                    LogTag::Repair,
                    &format!("Repaired record {}", display_timestamp(&fixed.timestamp)),
                );
            }

            fixed
        })
        .collect();

    (repaired, summary)
}

/// Repair one record, optionally against its raw capture
pub fn repair_record(
    record: &TradeRecord,
    raw: Option<&RawCapture>,
    patterns: &PatternSet,
    classifier: &LinkClassifier,
) -> TradeRecord {
    let mut fixed = record.clone();

    for field in fixed.text_fields_mut() {
        if let Some(value) = field.as_mut() {
            *value = fix_emojis(value);
        }
    }
    fixed.original_text = fix_emojis(&fixed.original_text);
    fixed.links = fixed
        .links
        .iter()
        .map(|(label, url)| (fix_emojis(label), fix_emojis(url)))
        .collect();

    if let Some(capture) = raw {
        let text = fix_emojis(&capture.message);
        fixed.contract = patterns.contract(&text).or(fixed.contract.take());
        fixed.seen_time = patterns.seen_time(&text).or(fixed.seen_time.take());
        fixed.original_text = text;
    }

    for field in [
        &mut fixed.details,
        &mut fixed.holdings,
        &mut fixed.market_cap,
        &mut fixed.seen_time,
    ] {
        *field = trimmed(field.take());
    }
    fixed.contract = trimmed(fixed.contract.take());

    fixed.links = reclassify_links(&fixed.links, classifier);

    if fixed.contract.is_none() {
        fixed.contract = contract_from_links(&fixed.links, patterns);
    }

    if let Some(contract) = &fixed.contract {
        if !fixed.links.contains_key(TOKEN) {
            fixed
                .links
                .insert(TOKEN.to_string(), format!("{}{}", TOKEN_EXPLORER_PREFIX, contract));
        }
    }

    fixed
}

/// Read the parsed and raw stores, repair, write the output store
///
/// A missing parsed file is an error; a missing raw file only disables the
/// raw re-derivation.
pub fn repair_files(
    parsed_path: &Path,
    raw_path: &Path,
    output_path: &Path,
    classifier: &LinkClassifier,
) -> FeedResult<RepairSummary> {
    if !parsed_path.exists() {
        return Err(FeedError::Store(format!(
            "Parsed records file '{}' not found",
            parsed_path.display()
        )));
    }
    let parsed: Vec<TradeRecord> = JsonArrayStore::new(parsed_path).read_all()?;

    let raw: Vec<RawCapture> = if raw_path.exists() {
        JsonArrayStore::new(raw_path).read_all()?
    } else {
        logger::warning(
            LogTag::Repair,
            &format!(
                "Raw captures file '{}' not found, repairing without raw text",
                raw_path.display()
            ),
        );
        Vec::new()
    };

    logger::info(
        LogTag::Repair,
        &format!("Loaded {} parsed records and {} raw captures", parsed.len(), raw.len()),
    );

    let (repaired, summary) = repair_with_summary(&parsed, &raw, classifier);
    JsonArrayStore::new(output_path).write_all(&repaired)?;

    Ok(summary)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Re-key links by the current rules; later labels win on collisions
fn reclassify_links(
    links: &BTreeMap<String, String>,
    classifier: &LinkClassifier,
) -> BTreeMap<String, String> {
    links
        .iter()
        .map(|(label, url)| (classifier.reclassify(url, label), url.clone()))
        .collect()
}

/// Address-looking last path segment of the first chart link that has one
fn contract_from_links(links: &BTreeMap<String, String>, patterns: &PatternSet) -> Option<String> {
    CHART_CATEGORIES.iter().find_map(|category| {
        let url = links.get(*category)?;
        let segment = last_path_segment(url)?;
        patterns
            .is_contract_like(segment)
            .then(|| segment.to_string())
    })
}

fn last_path_segment(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
}

fn display_timestamp(timestamp: &str) -> &str {
    if timestamp.is_empty() {
        "<no timestamp>"
    } else {
        timestamp
    }
}
