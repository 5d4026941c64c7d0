use anyhow::{bail, Context};
use clap::Parser;
use insiderfeed::config;
use insiderfeed::logger::{self, LogTag};
use insiderfeed::report::{select_trades, trades_table};
use insiderfeed::store::JsonArrayStore;
use insiderfeed::types::{TradeAction, TradeRecord};
use std::path::PathBuf;

/// List captured trades, newest first.
#[derive(Parser, Debug)]
#[command(name = "tool_list_trades", about = "List captured trades")]
struct Args {
    /// Only show one action kind (buy, sell, transfer, swap)
    #[arg(long)]
    action: Option<String>,

    /// Maximum number of trades to show
    #[arg(long, default_value_t = 20)]
    limit: usize,

    /// Records file (default: parsed records from config)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Configuration file (default: <data dir>/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    logger::init_console_only();

    if let Err(e) = run(args) {
        logger::error(LogTag::System, &format!("❌ {:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let action = match args.action.as_deref() {
        Some(name) => match TradeAction::from_name(name) {
            Some(action) => Some(action),
            None => bail!("unknown action '{}' (expected buy, sell, transfer or swap)", name),
        },
        None => None,
    };

    let path = match args.file {
        Some(path) => path,
        None => {
            let config = match &args.config {
                Some(path) => config::load_config_from_path(path),
                None => config::load_config(),
            }
            .context("loading configuration")?;
            config.storage.parsed_path()
        }
    };

    let records: Vec<TradeRecord> = JsonArrayStore::new(&path)
        .read_all()
        .with_context(|| format!("reading {}", path.display()))?;

    let selected = select_trades(&records, action, Some(args.limit));
    if selected.is_empty() {
        logger::info(LogTag::System, &format!("📋 No trades in {}", path.display()));
        return Ok(());
    }

    println!();
    println!(
        "📋 {} of {} trades from {}",
        selected.len(),
        records.len(),
        path.display()
    );
    println!("{}", trades_table(&selected));
    println!();

    Ok(())
}
