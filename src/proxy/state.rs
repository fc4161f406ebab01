use std::path::PathBuf;
use std::sync::Arc;

use crate::models::{AppConfig, SiteConfig};
use crate::proxy::mappers::gemini::GenerationConfig;
use crate::proxy::upstream::ChatBackend;

// Everything /api/chat needs; fixed at startup.
#[derive(Clone)]
pub struct ChatState {
    // None when no API key was found.
    pub backend: Option<Arc<dyn ChatBackend>>,
    pub persona: Arc<str>,
    pub generation_config: GenerationConfig,
    // Request bodies above this many bytes are rejected with a chat error.
    pub max_body_size: usize,
}

impl ChatState {
    pub fn new(backend: Option<Arc<dyn ChatBackend>>, max_body_size: usize) -> Self {
        Self {
            backend,
            persona: Arc::from(crate::constants::PERSONA),
            generation_config: GenerationConfig::default(),
            max_body_size,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }
}

#[derive(Clone)]
pub struct SiteState {
    pub index_path: PathBuf,
    pub static_dir: PathBuf,
}

impl From<&SiteConfig> for SiteState {
    fn from(config: &SiteConfig) -> Self {
        Self {
            index_path: config.index_path(),
            static_dir: config.static_dir.clone(),
        }
    }
}

// Axum application state
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatState>,
    pub site: Arc<SiteState>,
}

impl AppState {
    pub fn new(config: &AppConfig, backend: Option<Arc<dyn ChatBackend>>) -> Self {
        Self {
            chat: Arc::new(ChatState::new(
                backend,
                config.server.max_body_size,
            )),
            site: Arc::new(SiteState::from(&config.site)),
        }
    }
}

impl axum::extract::FromRef<AppState> for Arc<ChatState> {
    fn from_ref(state: &AppState) -> Self {
        state.chat.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<SiteState> {
    fn from_ref(state: &AppState) -> Self {
        state.site.clone()
    }
}
