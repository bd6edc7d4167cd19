pub mod config;
pub mod layout;
pub mod logger;
