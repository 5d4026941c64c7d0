//! Log formatting and output with ANSI colors
//!
//! Console lines are colored and aligned; file lines carry a full date and
//! plain tags. Multi-line messages (raw alert bodies) are split so every
//! line keeps the prefix.

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

const TAG_WIDTH: usize = 9;
const LEVEL_WIDTH: usize = 7;

pub fn format_and_log(tag: &LogTag, level: LogLevel, message: &str, to_file: bool) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string().dimmed();
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let tag_str = format_tag(tag);
    let level_str = format_level(level);
    let tag_plain = tag.to_plain_string();

    for line in message.split('\n') {
        print_stdout_safe(&format!("{} [{}] [{}] {}", time, tag_str, level_str, line));

        if to_file {
            write_to_file(&format!("{} [{}] [{}] {}", timestamp, tag_plain, level.as_str(), line));
        }
    }
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Telegram => label.bright_cyan().bold(),
        LogTag::Capture => label.bright_green().bold(),
        LogTag::Parser => label.bright_magenta().bold(),
        LogTag::Links => label.bright_blue().bold(),
        LogTag::Store => label.bright_purple().bold(),
        LogTag::Repair => label.bright_red().bold(),
        LogTag::Other(_) => label.white().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Debug | LogLevel::Verbose => label.dimmed(),
        LogLevel::Info => label.white().bold(),
    }
}

/// Print to stdout but ignore broken pipe errors
fn print_stdout_safe(message: &str) {
    if let Err(e) = writeln!(stdout(), "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        let _ = writeln!(std::io::stderr(), "Logger stdout error: {}", e);
    }
}
