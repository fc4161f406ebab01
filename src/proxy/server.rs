use axum::{extract::DefaultBodyLimit, Router};
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::error::{AppError, AppResult};
use crate::models::ServerConfig;
use crate::proxy::middleware::{cors_layer, request_context_middleware};
use crate::proxy::state::AppState;

pub struct AxumServer {
    pub local_addr: SocketAddr,
}

impl AxumServer {
    pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
        tracing::info!(
            "Request body size limit: {} KB",
            config.max_body_size / 1024
        );

        crate::proxy::routes::build_app_routes(&state.site)
            .layer(axum::middleware::from_fn(request_context_middleware))
            .layer(cors_layer(&config.cors_allowed_origins))
            .layer(DefaultBodyLimit::max(config.max_body_size))
            .with_state(state)
    }

    pub async fn start(
        config: &ServerConfig,
        state: AppState,
    ) -> AppResult<(Self, tokio::task::JoinHandle<()>)> {
        let app = Self::build_app(state, config);

        let addr = format!("{}:{}", config.host, config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Server(format!("Address {} binding failed: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Chat server started at http://{}", local_addr);

        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                match listener.accept().await {
                    Ok((stream, remote_addr)) => {
                        debug!("Accepted connection from {}", remote_addr);
                        let io = TokioIo::new(stream);
                        let service = TowerToHyperService::new(app.clone());

                        tokio::task::spawn(async move {
                            if let Err(err) = http1::Builder::new()
                                .serve_connection(io, service)
                                .await
                            {
                                debug!("Connection handling ended or failed: {:?}", err);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {:?}", e);
                    }
                }
            }
        });

        Ok((Self { local_addr }, handle))
    }
}
