//! Query-string parameters.

use serde::Deserialize;

use super::{require_non_blank, Validate};
use crate::http::response::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

impl Validate for UserIdQuery {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank(&self.user_id, "User ID is required and cannot be empty")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelIdQuery {
    pub channel_id: String,
}

impl Validate for ChannelIdQuery {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank(&self.channel_id, "Channel ID is required and cannot be empty")
    }
}

/// `/notices/all` parameters. `list_size` falls back to the configured default.
#[derive(Debug, Clone, Deserialize)]
pub struct NoticeListQuery {
    pub notice_type: String,
    pub list_size: Option<usize>,
}

impl Validate for NoticeListQuery {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank(&self.notice_type, "Notice type is required and cannot be empty")?;
        if self.list_size == Some(0) {
            return Err(ApiError::bad_request("list_size must be at least 1"));
        }
        Ok(())
    }
}

/// `/notices/new` parameters. Without a cursor every fetched notice is new.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNoticeQuery {
    pub notice_type: String,
    pub last_notice_link: Option<String>,
}

impl Validate for NewNoticeQuery {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank(&self.notice_type, "Notice type is required and cannot be empty")
    }
}
