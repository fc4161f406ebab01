use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::proxy::state::ChatState;

pub async fn health_check_handler(State(chat): State<Arc<ChatState>>) -> Response {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "chat_enabled": chat.is_enabled()
    }))
    .into_response()
}
