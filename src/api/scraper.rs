//! Scraper metadata listings.

use axum::{extract::State, Json};

use super::storage_failure;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::storage::Document;

pub async fn get_scraper_types(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let types = state
        .db
        .read_scraper_type_list()
        .map_err(storage_failure("Failed to read scraper types"))?;
    Ok(Json(types))
}

pub async fn get_scraper_categories(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let categories = state
        .db
        .read_category_list()
        .map_err(storage_failure("Failed to read scraper categories"))?;
    Ok(Json(categories))
}
