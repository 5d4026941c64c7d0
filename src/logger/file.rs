//! Daily log file output
//!
//! Lines go to `<logs dir>/insiderfeed_YYYY-MM-DD.log`. The file is reopened
//! when the date rolls over.

use crate::paths::get_logs_directory;
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;

struct LogFile {
    date: String,
    writer: BufWriter<File>,
}

static LOG_FILE: Lazy<Mutex<Option<LogFile>>> = Lazy::new(|| Mutex::new(None));

fn open_for_date(date: &str) -> Option<LogFile> {
    let dir = get_logs_directory();
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }

    let path = dir.join(format!("insiderfeed_{}.log", date));
    let file = OpenOptions::new().create(true).append(true).open(path).ok()?;

    Some(LogFile {
        date: date.to_string(),
        writer: BufWriter::new(file),
    })
}

pub fn init_file_logging() {
    let today = Local::now().format("%Y-%m-%d").to_string();
    if let Ok(mut guard) = LOG_FILE.lock() {
        if guard.is_none() {
            *guard = open_for_date(&today);
        }
    }
}

pub fn write_to_file(line: &str) {
    let Ok(mut guard) = LOG_FILE.lock() else {
        return;
    };

    // Not initialized: console-only mode
    let Some(current) = guard.as_mut() else {
        return;
    };

    let today = Local::now().format("%Y-%m-%d").to_string();
    if current.date != today {
        let _ = current.writer.flush();
        match open_for_date(&today) {
            Some(next) => *current = next,
            None => return,
        }
    }

    let _ = writeln!(current.writer, "{}", line);
}

pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(current) = guard.as_mut() {
            let _ = current.writer.flush();
        }
    }
}
