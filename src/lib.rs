pub mod arguments;
pub mod capture;
pub mod config;
pub mod errors;
pub mod links;
pub mod logger;
pub mod parser;
pub mod paths;
pub mod repair;
pub mod report;
pub mod shutdown;
pub mod store;
#[cfg(feature = "telegram")]
pub mod telegram;
pub mod types; // Records, captures and entities
