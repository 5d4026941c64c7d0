use anyhow::Context;
use clap::Parser;
use insiderfeed::config;
use insiderfeed::links::LinkClassifier;
use insiderfeed::logger::{self, LogTag};
use insiderfeed::repair::repair_files;
use std::path::PathBuf;

/// Repair stored trade records against their raw captures.
///
/// Restores marker emoji, re-derives contract and seen time from the raw
/// text, trims fields and reclassifies links. Writes a separate fixed file;
/// the inputs are left untouched.
#[derive(Parser, Debug)]
#[command(name = "tool_repair_records", about = "Repair stored trade records")]
struct Args {
    /// Parsed records file (default: from config)
    #[arg(long)]
    parsed: Option<PathBuf>,

    /// Raw captures file (default: from config)
    #[arg(long)]
    raw: Option<PathBuf>,

    /// Output file for repaired records (default: from config)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Configuration file (default: <data dir>/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    dotenv::dotenv().ok();
    logger::init_console_only();

    if let Err(e) = run(args) {
        logger::error(LogTag::Repair, &format!("❌ Repair failed: {:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    }
    .context("loading configuration")?;

    let parsed = args.parsed.unwrap_or_else(|| config.storage.parsed_path());
    let raw = args.raw.unwrap_or_else(|| config.storage.raw_path());
    let output = args.output.unwrap_or_else(|| config.storage.fixed_path());

    logger::info(
        LogTag::Repair,
        &format!(
            "Repairing {} (raw: {}) -> {}",
            parsed.display(),
            raw.display(),
            output.display()
        ),
    );

    let classifier = LinkClassifier::from_config(&config.links);
    let summary = repair_files(&parsed, &raw, &output, &classifier)?;

    logger::info(
        LogTag::Repair,
        &format!(
            "✅ {} records written ({} changed, {} matched raw, {} contracts recovered, {} token links added)",
            summary.records,
            summary.changed,
            summary.matched_raw,
            summary.contracts_recovered,
            summary.token_links_added
        ),
    );

    Ok(())
}
