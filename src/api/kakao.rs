//! KakaoTalk recipients.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use super::{found_or, storage_failure, validated};
use crate::http::response::{ApiError, SuccessResponse};
use crate::http::server::AppState;
use crate::models::query::UserIdQuery;
use crate::models::{KakaoUser, KakaoUserCreate, KakaoUserUpdate, Validate};

const USER_NOT_FOUND: &str = "Kakao user not found";
const TOKEN_NOT_FOUND: &str = "Kakao token not found";

pub async fn create_kakao_user(
    State(state): State<AppState>,
    payload: Result<Json<KakaoUserCreate>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let record = validated(payload)?.into_record();
    state
        .db
        .create_kakao_user(&record)
        .map_err(storage_failure("Failed to create kakao user"))?;
    Ok(Json(SuccessResponse::new("Kakao user created successfully")))
}

pub async fn get_kakao_user(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<KakaoUser>, ApiError> {
    let user = read_user(&state, query)?;
    Ok(Json(user))
}

pub async fn update_kakao_user(
    State(state): State<AppState>,
    payload: Result<Json<KakaoUserUpdate>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let data = validated(payload)?;
    let updated = state
        .db
        .update_kakao_user(&data.user_id, &data.scrapers, &data.access_token)
        .map_err(storage_failure("Failed to update kakao user"))?;
    found_or(updated, USER_NOT_FOUND, "Kakao user updated successfully")
}

pub async fn delete_kakao_user(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Query(query) = query?;
    query.validate()?;
    let deleted = state
        .db
        .delete_kakao_user(&query.user_id)
        .map_err(storage_failure("Failed to delete kakao user"))?;
    found_or(deleted, USER_NOT_FOUND, "Kakao user deleted successfully")
}

pub async fn get_kakao_token(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<String>, ApiError> {
    let user = read_user(&state, query)?;
    if user.access_token.is_empty() {
        return Err(ApiError::not_found(TOKEN_NOT_FOUND));
    }
    Ok(Json(user.access_token))
}

fn read_user(
    state: &AppState,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<KakaoUser, ApiError> {
    let Query(query) = query?;
    query.validate()?;
    state
        .db
        .read_kakao_user(&query.user_id)
        .map_err(storage_failure("Failed to read kakao user"))?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))
}
