use crate::models::{AppConfig, GeminiConfig, ServerConfig, SiteConfig};
use std::fmt;
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub field: String,
    pub message: String,
    pub actual_value: Option<String>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual_value {
            Some(val) => write!(f, "  • {}: {} (got: {})", self.field, self.message, val),
            None => write!(f, "  • {}: {}", self.field, self.message),
        }
    }
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            actual_value: None,
        }
    }

    fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            actual_value: Some(value.to_string()),
        }
    }
}

// A missing API key is not an error here: the server still starts and the
// chat endpoint answers 500 until a key is provided.
pub fn validate_app_config(config: &AppConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    validate_server_config(&config.server, &mut errors);
    validate_gemini_config(&config.gemini, &mut errors);
    validate_site_config(&config.site, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn format_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_server_config(config: &ServerConfig, errors: &mut Vec<ConfigError>) {
    if config.port == 0 {
        errors.push(ConfigError::with_value(
            "server.port",
            "must be between 1 and 65535",
            config.port,
        ));
    }
    if config.host.trim().is_empty() {
        errors.push(ConfigError::new("server.host", "must not be empty"));
    }
    if config.max_body_size == 0 {
        errors.push(ConfigError::with_value(
            "server.max_body_size",
            "must be greater than 0",
            config.max_body_size,
        ));
    }
    for (index, origin) in config.cors_allowed_origins.iter().enumerate() {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            errors.push(ConfigError::with_value(
                format!("server.cors_allowed_origins[{}]", index),
                "must start with http:// or https://",
                origin,
            ));
        }
    }
}

fn validate_gemini_config(config: &GeminiConfig, errors: &mut Vec<ConfigError>) {
    if config.model.trim().is_empty() {
        errors.push(ConfigError::new("gemini.model", "must not be empty"));
    }
    if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
        errors.push(ConfigError::with_value(
            "gemini.base_url",
            "must start with http:// or https://",
            &config.base_url,
        ));
    }
    if config.request_timeout == 0 {
        errors.push(ConfigError::with_value(
            "gemini.request_timeout",
            "must be greater than 0",
            config.request_timeout,
        ));
    } else if config.request_timeout > 600 {
        errors.push(ConfigError::with_value(
            "gemini.request_timeout",
            "should not exceed 600 seconds (10 minutes)",
            config.request_timeout,
        ));
    }
}

fn validate_site_config(config: &SiteConfig, errors: &mut Vec<ConfigError>) {
    if config.templates_dir.as_os_str().is_empty() {
        errors.push(ConfigError::new("site.templates_dir", "must not be empty"));
    }
    if config.static_dir.as_os_str().is_empty() {
        errors.push(ConfigError::new("site.static_dir", "must not be empty"));
    }
}
