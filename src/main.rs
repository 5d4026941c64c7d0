use insiderfeed::{
    arguments::{config_path_override, is_dry_run_enabled, is_help_requested, print_help},
    capture::CaptureService,
    config,
    logger::{self as logger, LogTag},
    parser::PATTERN_SET_VERSION,
    shutdown::{install_shutdown_handlers, ShutdownSignal},
    telegram::TelegramListener,
};
use std::path::PathBuf;

/// Main entry point for the alert listener
///
/// Loads configuration, validates the bot token and captures alerts until
/// Ctrl+C. Exits with code 1 on configuration errors or an invalid token.
#[tokio::main]
async fn main() {
    // Ensure all directories exist BEFORE logger initialization
    // (Logger needs logs directory to create log files)
    if let Err(e) = insiderfeed::paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    // .env may carry TELEGRAM_BOT_TOKEN
    dotenv::dotenv().ok();

    logger::init();

    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(LogTag::System, "🚀 InsiderFeed starting up...");

    let loaded = match config_path_override() {
        Some(path) => config::load_config_from_path(&PathBuf::from(path)),
        None => config::load_config(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            logger::error(LogTag::Config, &format!("❌ {}", e));
            logger::flush();
            std::process::exit(1);
        }
    };

    if !config.telegram.enabled {
        logger::warning(LogTag::System, "Telegram listener is disabled in config, nothing to do");
        logger::flush();
        return;
    }

    let dry_run = is_dry_run_enabled();
    if dry_run {
        logger::warning(LogTag::System, "🧪 Dry run: alerts are parsed but not stored");
    }

    logger::info(
        LogTag::Parser,
        &format!("Extraction pattern set v{}", PATTERN_SET_VERSION),
    );
    logger::info(
        LogTag::Store,
        &format!(
            "Raw captures: {} | Parsed records: {}",
            config.storage.raw_path().display(),
            config.storage.parsed_path().display()
        ),
    );

    let capture = CaptureService::from_config(&config).with_dry_run(dry_run);
    let listener = match TelegramListener::new(&config.telegram, capture) {
        Ok(listener) => listener,
        Err(e) => {
            logger::error(LogTag::Config, &format!("❌ {}", e));
            logger::flush();
            std::process::exit(1);
        }
    };

    let shutdown = ShutdownSignal::new();
    if let Err(e) = install_shutdown_handlers(shutdown.clone()) {
        logger::warning(LogTag::System, &format!("Failed to install Ctrl+C handler: {}", e));
    }

    match listener.run(shutdown).await {
        Ok(()) => {
            logger::info(LogTag::System, "✅ InsiderFeed stopped");
            logger::flush();
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ Listener failed: {}", e));
            logger::flush();
            std::process::exit(1);
        }
    }
}
