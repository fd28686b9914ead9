//! Connectivity check.

use axum::Json;

pub async fn connect_check() -> Json<&'static str> {
    Json("200 OK")
}
