//! Structured logging for the feed listener and its tools
//!
//! Small tag-based logging API:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via --debug-<tag> flags
//! - Dual output: colored console + daily log file
//! - Bridge for `log` records emitted by dependencies (teloxide)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use insiderfeed::logger::{self, LogTag};
//!
//! logger::error(LogTag::Store, "Failed to write parsed records");
//! logger::warning(LogTag::Telegram, "Polling error, retrying");
//! logger::info(LogTag::Capture, "Parsed trade recorded");
//! logger::debug(LogTag::Parser, "Pattern set v2 matched action"); // Only if --debug-parser
//! logger::verbose(LogTag::Links, "Entity slice: ..."); // Only if --verbose
//! ```
//!
//! Call `logger::init()` once at startup, after the directories exist.

mod bridge;
mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Parses command-line debug flags, opens the daily log file and installs
/// the `log` bridge. Safe to call more than once; later calls only refresh
/// the flag configuration.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
    bridge::install();
}

/// Initialize console-only logging (no log file), used by the CLI tools
pub fn init_console_only() {
    config::init_from_args();
    let mut current = get_logger_config();
    current.file_logging = false;
    set_logger_config(current);
    bridge::install();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (still shown with --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the matching --debug-<tag> flag is present.
///
/// # Example
/// ```rust,ignore
/// // Only shown with --debug-store
/// logger::debug(LogTag::Store, "Loaded 42 records from tgInsiders_parsed.json");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose or --verbose-<tag>)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush pending log file writes
///
/// Call during shutdown so the tail of the log reaches disk.
pub fn flush() {
    file::flush_file_logging();
}
