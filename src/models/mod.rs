pub mod config;

pub use config::{AppConfig, GeminiConfig, ServerConfig, SiteConfig};
