//! Bridge from the `log` facade into the tag logger
//!
//! teloxide and its HTTP stack report through `log`; their records land
//! under `LogTag::Other(<crate name>)` so they obey the same --debug-<tag>
//! gating (e.g. --debug-teloxide).

use super::levels::LogLevel;
use super::tags::LogTag;

struct TagBridge;

impl log::Log for TagBridge {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let target = record.target();
        let crate_name = target.split("::").next().unwrap_or(target);
        let tag = LogTag::Other(crate_name.to_string());
        let level = LogLevel::from_log_level(record.level());

        super::core::log_internal(tag, level, &record.args().to_string());
    }

    fn flush(&self) {
        super::file::flush_file_logging();
    }
}

static BRIDGE: TagBridge = TagBridge;

/// Install the bridge as the global `log` logger (first call wins)
pub fn install() {
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}
