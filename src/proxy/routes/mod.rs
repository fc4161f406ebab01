use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::proxy::handlers;
use crate::proxy::state::{AppState, SiteState};

pub fn build_app_routes(site: &SiteState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::frontend::serve_index))
        .route("/api/chat", post(handlers::chat::handle_chat))
        .route("/health", get(crate::proxy::health::health_check_handler))
        .route("/healthz", get(crate::proxy::health::health_check_handler))
        .nest_service("/static", ServeDir::new(&site.static_dir))
}
