//! Static bearer-token check.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::response::ApiError;
use crate::observability::metrics;

pub const INVALID_API_KEY: &str = "Forbidden: Invalid API Key";

/// Expected `Authorization` header value.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    expected: String,
}

impl BearerAuth {
    pub fn new(api_key: &str) -> Self {
        Self {
            expected: format!("Bearer {api_key}"),
        }
    }

    pub fn verify(&self, authorization: Option<&str>) -> bool {
        authorization == Some(self.expected.as_str())
    }
}

pub async fn bearer_auth_middleware(
    State(auth): State<Arc<BearerAuth>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if auth.verify(auth_header) {
        return next.run(request).await;
    }

    tracing::warn!(path = %request.uri().path(), "Rejected request with invalid API key");
    metrics::record_access_denied("api_key");
    ApiError::Forbidden(INVALID_API_KEY.to_string()).into_response()
}
