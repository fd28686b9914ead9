//! Discord recipients: direct messages and server channels.

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
use crate::models::query::{ChannelIdQuery, UserIdQuery};
use crate::models::{
    DirectMessage, DirectMessageCreate, DirectMessageUpdate, ServerChannel, ServerChannelCreate,
    ServerChannelUpdate, Validate,
};

const DM_NOT_FOUND: &str = "Direct message not found";
const CHANNEL_NOT_FOUND: &str = "Server channel not found";

pub async fn get_direct_messages(State(state): State<AppState>) -> Result<Json<Vec<DirectMessage>>, ApiError> {
    let list = state
        .db
        .read_direct_messages_list()
        .map_err(storage_failure("Failed to read direct messages"))?;
    Ok(Json(list))
}

pub async fn create_direct_message(
    State(state): State<AppState>,
    payload: Result<Json<DirectMessageCreate>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let record = validated(payload)?.into_record();
    state
        .db
        .create_direct_message(&record)
        .map_err(storage_failure("Failed to create direct message"))?;
    Ok(Json(SuccessResponse::new("Direct message created successfully")))
}

pub async fn get_direct_message(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<DirectMessage>, ApiError> {
    let Query(query) = query?;
    query.validate()?;
    state
        .db
        .read_direct_message(&query.user_id)
        .map_err(storage_failure("Failed to read direct message"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(DM_NOT_FOUND))
}

pub async fn update_direct_message(
    State(state): State<AppState>,
    payload: Result<Json<DirectMessageUpdate>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let data = validated(payload)?;
    let updated = state
        .db
        .update_direct_message(&data.user_id, &data.scrapers)
        .map_err(storage_failure("Failed to update direct message"))?;
    found_or(updated, DM_NOT_FOUND, "Direct message updated successfully")
}

pub async fn delete_direct_message(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Query(query) = query?;
    query.validate()?;
    let deleted = state
        .db
        .delete_direct_message(&query.user_id)
        .map_err(storage_failure("Failed to delete direct message"))?;
    found_or(deleted, DM_NOT_FOUND, "Direct message deleted successfully")
}

pub async fn get_server_channels(State(state): State<AppState>) -> Result<Json<Vec<ServerChannel>>, ApiError> {
    let list = state
        .db
        .read_server_channels_list()
        .map_err(storage_failure("Failed to read server channels"))?;
    Ok(Json(list))
}

pub async fn create_server_channel(
    State(state): State<AppState>,
    payload: Result<Json<ServerChannelCreate>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let record = validated(payload)?.into_record();
    state
        .db
        .create_server_channel(&record)
        .map_err(storage_failure("Failed to create server channel"))?;
    Ok(Json(SuccessResponse::new("Server channel created successfully")))
}

pub async fn get_server_channel(
    State(state): State<AppState>,
    query: Result<Query<ChannelIdQuery>, QueryRejection>,
) -> Result<Json<ServerChannel>, ApiError> {
    let Query(query) = query?;
    query.validate()?;
    state
        .db
        .read_server_channel(&query.channel_id)
        .map_err(storage_failure("Failed to read server channel"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(CHANNEL_NOT_FOUND))
}

pub async fn update_server_channel(
    State(state): State<AppState>,
    payload: Result<Json<ServerChannelUpdate>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let data = validated(payload)?;
    let updated = state
        .db
        .update_server_channel(&data.channel_id, &data.scrapers)
        .map_err(storage_failure("Failed to update server channel"))?;
    found_or(updated, CHANNEL_NOT_FOUND, "Server channel updated successfully")
}

pub async fn delete_server_channel(
    State(state): State<AppState>,
    query: Result<Query<ChannelIdQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Query(query) = query?;
    query.validate()?;
    let deleted = state
        .db
        .delete_server_channel(&query.channel_id)
        .map_err(storage_failure("Failed to delete server channel"))?;
    found_or(deleted, CHANNEL_NOT_FOUND, "Server channel deleted successfully")
}
