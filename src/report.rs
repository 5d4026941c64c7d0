//! Console listing of parsed trades
use crate::types::{TradeAction, TradeRecord};
use comfy_table::{modifiers, presets, Attribute, Cell, Color, ContentArrangement, Table};

/// Newest first, optionally one action kind, at most `limit` records
pub fn select_trades<'a>(
    records: &'a [TradeRecord],
    action: Option<TradeAction>,
    limit: Option<usize>,
) -> Vec<&'a TradeRecord> {
    let mut selected: Vec<&TradeRecord> = records
        .iter()
        .filter(|record| action.map_or(true, |a| record.trade_action() == Some(a)))
        .collect();

    // Capture timestamps sort lexicographically; ties keep the later arrival first
    selected.reverse();
    selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    if let Some(limit) = limit {
        selected.truncate(limit);
    }
    selected
}

fn action_cell(record: &TradeRecord) -> Cell {
    let label = record.action.as_deref().unwrap_or("-");
    match record.trade_action() {
        Some(TradeAction::Buy) => Cell::new(label).fg(Color::Green),
        Some(TradeAction::Sell) => Cell::new(label).fg(Color::Red),
        Some(TradeAction::Transfer) | Some(TradeAction::Swap) => Cell::new(label).fg(Color::Blue),
        None => Cell::new(label),
    }
}

fn short_contract(contract: &str) -> String {
    if contract.chars().count() > 12 {
        let head: String = contract.chars().take(6).collect();
        let tail: String = contract.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        format!("{}...{}", head, tail)
    } else {
        contract.to_string()
    }
}

pub fn trades_table(records: &[&TradeRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        ["Time", "Action", "Token", "Platform", "Wallet", "MC", "Seen", "Contract"]
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );

    for record in records {
        let time = record.timestamp.get(..19).unwrap_or(&record.timestamp).replace('T', " ");
        let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(time),
            action_cell(record),
            Cell::new(dash(&record.token)),
            Cell::new(dash(&record.platform)),
            Cell::new(dash(&record.wallet)),
            Cell::new(dash(&record.market_cap)),
            Cell::new(dash(&record.seen_time)),
            Cell::new(record.contract.as_deref().map(short_contract).unwrap_or_else(|| "-".to_string())),
        ]);
    }

    table
}
