//! Request schemas and stored recipient records.
//!
//! Every request body or query has one explicit type, validated with
//! [`Validate`] before it reaches storage.

pub mod discord;
pub mod kakao;
pub mod query;

use crate::http::response::ApiError;

pub use discord::{
    DirectMessage, DirectMessageCreate, DirectMessageUpdate, ServerChannel, ServerChannelCreate,
    ServerChannelUpdate,
};
pub use kakao::{KakaoUser, KakaoUserCreate, KakaoUserUpdate};

/// Boundary validation beyond what deserialization enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

pub(crate) fn require_non_blank(value: &str, detail: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::bad_request(detail))
    } else {
        Ok(())
    }
}
