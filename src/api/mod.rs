//! HTTP endpoints.
//!
//! # Data Flow
//! ```text
//! Request (already past the access gate)
//!     → bearer_auth_middleware (matched routes only)
//!     → extractor (Json / Query) → Validate
//!     → DbManager
//!     → Json response or ApiError
//! ```

pub mod discord;
pub mod health;
pub mod kakao;
pub mod notices;
pub mod scraper;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    middleware,
    routing::get,
    Json, Router,
};

use crate::http::response::{ApiError, SuccessResponse};
use crate::http::server::AppState;
use crate::models::Validate;
use crate::security::auth::{bearer_auth_middleware, BearerAuth};
use crate::storage::StorageError;

/// Prefix every endpoint is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Build the versioned API router. Every route requires the bearer token.
pub fn router(state: AppState, auth: Arc<BearerAuth>) -> Router {
    Router::new()
        .route("/connect-check", get(health::connect_check))
        .route(
            "/discord/direct-messages",
            get(discord::get_direct_messages)
                .post(discord::create_direct_message)
                .put(discord::update_direct_message)
                .delete(discord::delete_direct_message),
        )
        .route("/discord/direct-message", get(discord::get_direct_message))
        .route(
            "/discord/server-channels",
            get(discord::get_server_channels)
                .post(discord::create_server_channel)
                .put(discord::update_server_channel)
                .delete(discord::delete_server_channel),
        )
        .route("/discord/server-channel", get(discord::get_server_channel))
        .route(
            "/kakao/user",
            get(kakao::get_kakao_user)
                .post(kakao::create_kakao_user)
                .put(kakao::update_kakao_user)
                .delete(kakao::delete_kakao_user),
        )
        .route("/kakao/token", get(kakao::get_kakao_token))
        .route("/notices/all", get(notices::get_notices))
        .route("/notices/new", get(notices::get_new_notices))
        .route("/scraper/types", get(scraper::get_scraper_types))
        .route("/scraper/categories", get(scraper::get_scraper_categories))
        .route_layer(middleware::from_fn_with_state(auth, bearer_auth_middleware))
        .with_state(state)
}

/// Unwrap a JSON body and run its boundary validation.
pub(crate) fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(data) = payload?;
    data.validate()?;
    Ok(data)
}

/// Log a storage failure and hide its details behind `detail`.
pub(crate) fn storage_failure(detail: &'static str) -> impl FnOnce(StorageError) -> ApiError {
    move |e| {
        tracing::error!(error = %e, detail, "Storage operation failed");
        ApiError::internal(detail)
    }
}

/// Success body when an update or delete matched a record, 404 otherwise.
pub(crate) fn found_or(
    matched: bool,
    not_found: &str,
    message: &str,
) -> Result<Json<SuccessResponse>, ApiError> {
    if matched {
        Ok(Json(SuccessResponse::new(message)))
    } else {
        Err(ApiError::not_found(not_found))
    }
}
