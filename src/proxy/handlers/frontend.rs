use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::proxy::state::SiteState;

// Read on every hit so page edits show up without a restart.
pub async fn serve_index(State(site): State<Arc<SiteState>>) -> Response {
    match tokio::fs::read_to_string(&site.index_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!("Chat page {:?} unavailable: {}", site.index_path, e);
            (StatusCode::NOT_FOUND, "Chat page not found").into_response()
        }
    }
}
