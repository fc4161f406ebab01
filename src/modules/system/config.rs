use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{info, warn};

use crate::constants::{API_KEY_ENV, API_KEY_FILE};
use crate::models::AppConfig;

const DATA_DIR: &str = ".biopatch-chat";

pub fn get_data_dir() -> Result<PathBuf, String> {
    fn ensure_dir(path: &PathBuf) -> Result<(), String> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| format!("failed_to_create_data_dir: {}", e))?;
        }
        Ok(())
    }
    if let Ok(env_path) = std::env::var("DATA_DIR") {
        if !env_path.trim().is_empty() {
            let data_dir = PathBuf::from(env_path);
            ensure_dir(&data_dir)?;
            return Ok(data_dir);
        }
    }
    if cfg!(test) {
        let data_dir =
            std::env::temp_dir().join(format!(".biopatch-chat-test-{}", std::process::id()));
        ensure_dir(&data_dir)?;
        return Ok(data_dir);
    }

    if let Some(home) = dirs::home_dir() {
        let data_dir = home.join(DATA_DIR);
        if ensure_dir(&data_dir).is_ok() {
            return Ok(data_dir);
        }
    }

    let fallback = std::env::temp_dir().join(DATA_DIR);
    ensure_dir(&fallback)?;
    Ok(fallback)
}

pub(crate) fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_number<T: FromStr>(name: &str) -> Option<T> {
    let raw = non_empty_env(name)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {} value: {}", name, raw);
            None
        }
    }
}

/// Environment variable first, then the local key file. Blank values count
/// as missing.
pub fn resolve_api_key(env_value: Option<String>, key_file: &Path) -> Option<String> {
    if let Some(key) = env_value.map(|k| k.trim().to_string()) {
        if !key.is_empty() {
            info!("Using Gemini API key from environment");
            return Some(key);
        }
    }

    match fs::read_to_string(key_file) {
        Ok(content) => {
            let key = content.trim().to_string();
            if key.is_empty() {
                warn!("API key file {:?} is empty", key_file);
                None
            } else {
                info!("Gemini API key loaded from local file {:?} (development mode)", key_file);
                Some(key)
            }
        }
        Err(e) => {
            warn!(
                "No Gemini API key in {} or {:?}: {}",
                API_KEY_ENV, key_file, e
            );
            None
        }
    }
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Some(host) = non_empty_env("HOST") {
        config.server.host = host;
    }
    if let Some(port) = env_number::<u16>("PORT") {
        config.server.port = port;
    }
    if let Some(size) = env_number::<usize>("MAX_BODY_SIZE") {
        config.server.max_body_size = size;
    }
    if let Some(origins) = non_empty_env("CORS_ALLOWED_ORIGINS") {
        config.server.cors_allowed_origins = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }

    if let Some(model) = non_empty_env("GEMINI_MODEL") {
        info!("Using Gemini model from environment: {}", model);
        config.gemini.model = model;
    }
    if let Some(base_url) = non_empty_env("GEMINI_BASE_URL") {
        config.gemini.base_url = base_url;
    }
    if let Some(timeout) = env_number::<u64>("REQUEST_TIMEOUT_SECS") {
        config.gemini.request_timeout = timeout;
    }

    if let Some(dir) = non_empty_env("TEMPLATES_DIR") {
        config.site.templates_dir = PathBuf::from(dir);
    }
    if let Some(dir) = non_empty_env("STATIC_DIR") {
        config.site.static_dir = PathBuf::from(dir);
    }

    // Hosted deployments (Render sets RENDER) have no desktop to open.
    if std::env::var_os("RENDER").is_some() {
        config.open_browser = false;
    }
    if let Some(raw) = non_empty_env("NO_BROWSER") {
        match parse_env_bool(&raw) {
            Some(true) => config.open_browser = false,
            Some(false) => {}
            None => warn!("Ignoring invalid NO_BROWSER value: {}", raw),
        }
    }
}

pub fn load_app_config() -> AppConfig {
    let mut config = AppConfig::new();
    apply_env_overrides(&mut config);

    let key_file = non_empty_env("GEMINI_API_KEY_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(API_KEY_FILE));
    config.gemini.api_key = resolve_api_key(std::env::var(API_KEY_ENV).ok(), &key_file);

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{lock_env, ScopedEnvVar};
    use std::io::Write;

    fn key_file_with(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp key file");
        file.write_all(content.as_bytes()).expect("write key file");
        file
    }

    #[test]
    fn env_key_wins_over_file() {
        let file = key_file_with("file-key");
        let key = resolve_api_key(Some("env-key".to_string()), file.path());
        assert_eq!(key.as_deref(), Some("env-key"));
    }

    #[test]
    fn file_key_is_trimmed() {
        let file = key_file_with("  file-key\n");
        let key = resolve_api_key(None, file.path());
        assert_eq!(key.as_deref(), Some("file-key"));
    }

    #[test]
    fn blank_env_key_falls_back_to_file() {
        let file = key_file_with("file-key");
        let key = resolve_api_key(Some("   ".to_string()), file.path());
        assert_eq!(key.as_deref(), Some("file-key"));
    }

    #[test]
    fn missing_env_and_file_yields_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let key = resolve_api_key(None, &dir.path().join("absent.txt"));
        assert!(key.is_none());
    }

    #[test]
    fn empty_key_file_yields_none() {
        let file = key_file_with("\n");
        assert!(resolve_api_key(None, file.path()).is_none());
    }

    #[test]
    fn load_app_config_reads_port_and_key_from_env() {
        let _guard = lock_env();
        let _port = ScopedEnvVar::set("PORT", "8080");
        let _key = ScopedEnvVar::set("GEMINI_API_KEY", "env-key");
        let _render = ScopedEnvVar::unset("RENDER");
        let _no_browser = ScopedEnvVar::unset("NO_BROWSER");

        let config = load_app_config();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gemini.api_key.as_deref(), Some("env-key"));
        assert!(config.open_browser);
    }

    #[test]
    fn invalid_port_keeps_default() {
        let _guard = lock_env();
        let _port = ScopedEnvVar::set("PORT", "not-a-port");
        let config = load_app_config();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn render_environment_disables_browser() {
        let _guard = lock_env();
        let _render = ScopedEnvVar::set("RENDER", "true");
        let config = load_app_config();
        assert!(!config.open_browser);
    }

    #[test]
    fn key_file_override_is_used_when_env_is_absent() {
        let _guard = lock_env();
        let file = key_file_with("from-file");
        let _key = ScopedEnvVar::unset("GEMINI_API_KEY");
        let path = file.path().to_string_lossy().to_string();
        let _file = ScopedEnvVar::set("GEMINI_API_KEY_FILE", &path);

        let config = load_app_config();
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let _guard = lock_env();
        let _origins = ScopedEnvVar::set(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000, https://biopatch.example ,",
        );
        let config = load_app_config();
        assert_eq!(
            config.server.cors_allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://biopatch.example".to_string()
            ]
        );
    }

    #[test]
    fn parse_env_bool_accepts_common_spellings() {
        assert_eq!(parse_env_bool("YES"), Some(true));
        assert_eq!(parse_env_bool(" off "), Some(false));
        assert_eq!(parse_env_bool("maybe"), None);
    }
}
