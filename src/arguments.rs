/// Centralized argument handling for the listener binary
///
/// Holds the process arguments and answers lookups for the listener's
/// switches (`--config`, `--dry-run`, `--help`). The logger reads the same
/// store for `--debug-<tag>`, `--verbose` and `--quiet`.
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Value following a flag (`--config path.toml`), if any
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Explicit configuration file path
pub fn config_path_override() -> Option<String> {
    get_arg_value("--config")
}

/// Parse and log messages without writing the store files
pub fn is_dry_run_enabled() -> bool {
    has_arg("--dry-run")
}

pub fn print_help() {
    println!("insiderfeed - Telegram trade alert capture");
    println!();
    println!("USAGE:");
    println!("    insiderfeed [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --config <PATH>      Configuration file (default: <data dir>/config.toml)");
    println!("    --dry-run            Parse and log alerts without writing the store files");
    println!("    --debug-<tag>        Debug output for one tag (telegram, capture, parser, links, store)");
    println!("    --verbose            Verbose output for every tag");
    println!("    --quiet              Only warnings and errors");
    println!("    -h, --help           Print this help");
}
