use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::modules::system::request_context::{with_request_context, RequestContext};

const REQUEST_ID_HEADER: &str = "x-request-id";

// Honors an incoming x-request-id, otherwise mints one, and echoes it back.
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("req_{}", uuid::Uuid::new_v4().simple()));

    let ctx = RequestContext {
        request_id: Some(request_id.clone()),
    };

    let mut response = with_request_context(ctx, next.run(request)).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}
