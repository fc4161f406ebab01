pub mod constants;
pub mod error;
pub mod models;
pub mod modules;
pub mod proxy;
#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use error::{AppError, AppResult};
use modules::system::{browser, logger, validation};
use proxy::{AppState, AxumServer, ChatBackend, GeminiClient};
use tracing::{error, info, warn};

async fn start_server() -> AppResult<()> {
    let config = modules::system::config::load_app_config();
    validation::validate_app_config(&config).map_err(|errors| {
        AppError::Config(format!(
            "configuration_validation_failed:\n{}",
            validation::format_errors(&errors)
        ))
    })?;

    let backend: Option<Arc<dyn ChatBackend>> = match config.gemini.api_key.clone() {
        Some(api_key) => {
            info!("Chat enabled with model {}", config.gemini.model);
            Some(Arc::new(GeminiClient::new(&config.gemini, api_key)?))
        }
        None => {
            error!("No Gemini API key found: the server will start but /api/chat will fail");
            None
        }
    };

    let state = AppState::new(&config, backend);
    let (server, handle) = AxumServer::start(&config.server, state).await?;

    if config.open_browser {
        browser::schedule_open(format!("http://127.0.0.1:{}", server.local_addr.port()));
    } else {
        info!("Browser auto-open disabled");
    }

    info!("BioPatch chat server is running. Press Ctrl+C to exit.");
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for Ctrl+C: {}", e);
            }
            info!("Shutting down chat server");
        }
        result = handle => {
            return Err(AppError::Server(format!("server task ended unexpectedly: {:?}", result)));
        }
    }
    Ok(())
}

pub fn run() -> AppResult<()> {
    logger::init_logger();
    info!("--- BioPatch chat server starting ---");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(start_server())
}
