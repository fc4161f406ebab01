pub mod browser;
pub mod config;
pub mod logger;
pub mod request_context;
pub mod validation;
