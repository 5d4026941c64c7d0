/// Log tags identifying the subsystem a message comes from

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Telegram,
    Capture,
    Parser,
    Links,
    Store,
    Repair,
    Other(String),
}

impl LogTag {
    /// Key used by --debug-<key> / --verbose-<key> flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Telegram => "telegram".to_string(),
            LogTag::Capture => "capture".to_string(),
            LogTag::Parser => "parser".to_string(),
            LogTag::Links => "links".to_string(),
            LogTag::Store => "store".to_string(),
            LogTag::Repair => "repair".to_string(),
            LogTag::Other(name) => name.to_lowercase(),
        }
    }

    /// Uppercase label without colors, used in log files
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Telegram => "TELEGRAM".to_string(),
            LogTag::Capture => "CAPTURE".to_string(),
            LogTag::Other(name) => name.to_uppercase(),
            other => other.to_debug_key().to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys() {
        assert_eq!(LogTag::Store.to_debug_key(), "store");
        assert_eq!(LogTag::Other("Teloxide".into()).to_debug_key(), "teloxide");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(LogTag::Repair.to_plain_string(), "REPAIR");
        assert_eq!(LogTag::Other("reqwest".into()).to_plain_string(), "REQWEST");
    }
}
