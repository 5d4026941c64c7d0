/// Core logging implementation with automatic filtering
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Anything above the minimum level threshold is dropped
/// 3. Debug requires --debug-<tag> (or --verbose)
/// 4. Verbose requires --verbose or --verbose-<tag>
pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level && !(level == LogLevel::Verbose && is_verbose_enabled_for_tag(config, tag)) {
        return false;
    }

    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(config, tag);
    }

    if level == LogLevel::Verbose {
        return config.min_level == LogLevel::Verbose || is_verbose_enabled_for_tag(config, tag);
    }

    true
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let config = get_logger_config();
    if !should_log(&config, &tag, level) {
        return;
    }

    super::format::format_and_log(&tag, level, message, config.file_logging);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_always_pass() {
        let mut config = LoggerConfig::default();
        config.min_level = LogLevel::Warning;
        assert!(should_log(&config, &LogTag::Store, LogLevel::Error));
        assert!(!should_log(&config, &LogTag::Store, LogLevel::Info));
    }

    #[test]
    fn test_debug_needs_tag_flag() {
        let mut config = LoggerConfig::default();
        assert!(!should_log(&config, &LogTag::Parser, LogLevel::Debug));
        config.debug_tags.insert("parser".to_string());
        assert!(should_log(&config, &LogTag::Parser, LogLevel::Debug));
        assert!(!should_log(&config, &LogTag::Store, LogLevel::Debug));
    }

    #[test]
    fn test_verbose_per_tag() {
        let mut config = LoggerConfig::default();
        assert!(!should_log(&config, &LogTag::Links, LogLevel::Verbose));
        config.verbose_tags.insert("links".to_string());
        assert!(should_log(&config, &LogTag::Links, LogLevel::Verbose));
    }

    #[test]
    fn test_quiet_drops_info() {
        let mut config = LoggerConfig::default();
        assert!(should_log(&config, &LogTag::Repair, LogLevel::Info));
        config.min_level = LogLevel::Warning;
        assert!(!should_log(&config, &LogTag::Repair, LogLevel::Info));
        assert!(should_log(&config, &LogTag::Repair, LogLevel::Warning));
    }
}
