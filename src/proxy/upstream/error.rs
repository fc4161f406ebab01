// Error classification for calls to the Gemini API
use thiserror::Error;

/// Failures reported by a [`super::ChatBackend`].
///
/// `Communication` covers everything that went wrong talking to the API
/// (network, timeout, quota, auth, server errors) and surfaces as 503.
/// `InvalidResponse` means the call went through but the payload could not be
/// read; it is treated like any other internal failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Gemini API call failed: {0}")]
    Communication(String),

    #[error("Gemini API returned an unreadable payload: {0}")]
    InvalidResponse(String),
}

impl UpstreamError {
    pub fn is_communication(&self) -> bool {
        matches!(self, UpstreamError::Communication(_))
    }
}

// Short label for logs describing what kind of transport failure happened.
pub fn classify_transport_error(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout_error"
    } else if error.is_connect() {
        "connection_error"
    } else if error.is_decode() {
        "decode_error"
    } else if error.is_body() {
        "stream_error"
    } else if error.is_request() {
        "request_error"
    } else {
        "unknown_error"
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(error: reqwest::Error) -> Self {
        UpstreamError::Communication(format!(
            "{} ({})",
            error,
            classify_transport_error(&error)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_refused_is_a_communication_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();
        let error = client.get("http://127.0.0.1:9/").send().await.unwrap_err();

        let label = classify_transport_error(&error);
        assert!(
            label == "connection_error" || label == "timeout_error" || label == "request_error",
            "unexpected label {}",
            label
        );
        assert!(UpstreamError::from(error).is_communication());
    }

    #[test]
    fn test_invalid_response_is_not_communication() {
        assert!(!UpstreamError::InvalidResponse("x".to_string()).is_communication());
    }
}
