use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_MISSING_MESSAGE, INTERNAL_ERROR_PREFIX, UPSTREAM_FAILURE_MESSAGE};
use crate::error::ChatError;
use crate::modules::system::logger;
use crate::proxy::upstream::UpstreamError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl ChatError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::Upstream(UpstreamError::Communication(_)) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // What the widget shows. Upstream details stay in the server log.
    pub fn public_message(&self) -> String {
        match self {
            ChatError::ConfigurationMissing => CONFIG_MISSING_MESSAGE.to_string(),
            ChatError::Upstream(UpstreamError::Communication(_)) => {
                UPSTREAM_FAILURE_MESSAGE.to_string()
            }
            other => format!("{}: {}", INTERNAL_ERROR_PREFIX, other),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        match &self {
            ChatError::ConfigurationMissing => {
                logger::log_warn("[Chat] Rejected request: Gemini API key is not configured")
            }
            ChatError::Upstream(UpstreamError::Communication(detail)) => {
                logger::log_error(&format!("[Gemini API Error]: {}", detail))
            }
            other => logger::log_error(&format!("[Server Error]: {}", other)),
        }
        error_response(self.status_code(), self.public_message())
    }
}
