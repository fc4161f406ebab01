use axum::{
    body::{to_bytes, Body},
    extract::State,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ChatError, ChatResult};
use crate::modules::system::logger;
use crate::proxy::mappers::gemini::{build_generate_request, extract_text};
use crate::proxy::mappers::history::normalize_history;
use crate::proxy::mappers::sanitizer::sanitize_response;
use crate::proxy::state::ChatState;

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    // Kept untyped so one bad entry cannot reject the whole history.
    #[serde(default)]
    pub history: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

// Takes the raw body so the key check and the size limit both answer with a
// chat error instead of the extractor's plain-text rejection.
pub async fn handle_chat(State(chat): State<Arc<ChatState>>, body: Body) -> Response {
    match complete_chat(&chat, body).await {
        Ok(text) => Json(ChatReply { response: text }).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn complete_chat(chat: &ChatState, body: Body) -> ChatResult<String> {
    // Checked before the body so a missing key always yields the same answer.
    let backend = chat
        .backend
        .as_ref()
        .ok_or(ChatError::ConfigurationMissing)?;

    let body = to_bytes(body, chat.max_body_size)
        .await
        .map_err(|e| ChatError::InvalidRequest(e.to_string()))?;
    let request: ChatRequest =
        serde_json::from_slice(&body).map_err(|e| ChatError::InvalidRequest(e.to_string()))?;

    let turns = normalize_history(&request.history);
    logger::log_info(&format!(
        "[Chat] Received {} history entries, forwarding {} to {}",
        request.history.len(),
        turns.len(),
        backend.model()
    ));

    let upstream_request = build_generate_request(&turns, &chat.persona, chat.generation_config);
    let response = backend.generate(&upstream_request).await?;
    let raw_text = extract_text(&response)?;

    let cleaned = sanitize_response(Some(&raw_text));
    tracing::debug!(
        "[Chat] Model replied with {} chars ({} after cleanup)",
        raw_text.chars().count(),
        cleaned.chars().count()
    );
    Ok(cleaned)
}
