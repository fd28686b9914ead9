//! Local-access middleware.
//! Rejects requests whose origin is not a local address before any handler runs.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;

use crate::http::response::ApiError;
use crate::observability::metrics;
use crate::security::access_control::{peer_ip_string, AccessGate};

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const LOCAL_ACCESS_ONLY: &str =
    "Forbidden: external access is not allowed. Only local access is permitted.";

/// State required for the access gate.
#[derive(Clone)]
pub struct LocalAccessState {
    pub gate: Arc<AccessGate>,
    pub enabled: bool,
}

pub async fn local_access_middleware(
    State(state): State<LocalAccessState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.enabled {
        return next.run(req).await;
    }

    let direct = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| peer_ip_string(addr));
    // A forwarding header that is present but not text fails closed.
    let forwarded_for = match req.headers().get(X_FORWARDED_FOR).map(|v| v.to_str()) {
        Some(Ok(value)) => Some(value.to_string()),
        Some(Err(_)) => return reject("undecodable x-forwarded-for", req.uri().path()),
        None => None,
    };

    let decision = state
        .gate
        .classify(forwarded_for.as_deref(), direct.as_deref());
    if decision.is_allowed() {
        return next.run(req).await;
    }

    let client = state.gate.candidate(forwarded_for.as_deref(), direct.as_deref());
    reject(client.as_deref().unwrap_or("unknown"), req.uri().path())
}

fn reject(client: &str, path: &str) -> Response {
    warn!(client, path, "Blocked external access");
    metrics::record_access_denied("external_ip");

    ApiError::Forbidden(LOCAL_ACCESS_ONLY.to_string()).into_response()
}
