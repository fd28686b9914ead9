//! Notice listings.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use super::storage_failure;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::models::query::{NewNoticeQuery, NoticeListQuery};
use crate::models::Validate;
use crate::notices::{delta, Notice};

/// Latest `list_size` notices of a type, newest first.
pub async fn get_notices(
    State(state): State<AppState>,
    query: Result<Query<NoticeListQuery>, QueryRejection>,
) -> Result<Json<Vec<Notice>>, ApiError> {
    let Query(query) = query?;
    query.validate()?;

    let max = state.notices.max_list_size;
    let list_size = query.list_size.unwrap_or(state.notices.default_list_size);
    if list_size > max {
        return Err(ApiError::bad_request(format!("list_size must be between 1 and {max}")));
    }

    let notices = state
        .db
        .read_notice_list(query.notice_type.trim(), list_size)
        .map_err(storage_failure("Failed to read notices"))?;
    Ok(Json(notices))
}

/// Notices newer than `last_notice_link`, scanned within the latest
/// `delta_window` notices.
pub async fn get_new_notices(
    State(state): State<AppState>,
    query: Result<Query<NewNoticeQuery>, QueryRejection>,
) -> Result<Json<Vec<Notice>>, ApiError> {
    let Query(query) = query?;
    query.validate()?;

    let notice_type = query.notice_type.trim();
    let notices = state
        .db
        .read_notice_list(notice_type, state.notices.delta_window)
        .map_err(storage_failure("Failed to read notices"))?;

    let fresh = delta(&notices, query.last_notice_link.as_deref());
    tracing::debug!(
        notice_type,
        fetched = notices.len(),
        new = fresh.len(),
        "Computed new notices"
    );
    Ok(Json(fresh.to_vec()))
}
