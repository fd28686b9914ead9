//! Discord notification recipients.

use serde::{Deserialize, Serialize};

use super::{require_non_blank, Validate};
use crate::http::response::ApiError;

pub const DIRECT_MESSAGES: &str = "direct-messages";
pub const SERVER_CHANNELS: &str = "server-channels";

/// Stored direct-message recipient, keyed by Discord user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub user_name: String,
    pub channel_type: String,
    #[serde(default)]
    pub scrapers: Vec<String>,
}

/// Stored server-channel recipient, keyed by channel id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerChannel {
    #[serde(rename = "_id")]
    pub channel_id: String,
    pub channel_name: String,
    pub channel_type: String,
    pub guild_name: String,
    #[serde(default)]
    pub scrapers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectMessageCreate {
    pub user_id: String,
    pub user_name: String,
    pub scrapers: Vec<String>,
}

impl DirectMessageCreate {
    pub fn into_record(self) -> DirectMessage {
        DirectMessage {
            user_id: self.user_id,
            user_name: self.user_name,
            channel_type: DIRECT_MESSAGES.to_string(),
            scrapers: self.scrapers,
        }
    }
}

impl Validate for DirectMessageCreate {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank(&self.user_id, "User ID is required and cannot be empty")?;
        require_non_blank(&self.user_name, "User name is required and cannot be empty")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectMessageUpdate {
    pub user_id: String,
    pub scrapers: Vec<String>,
}

impl Validate for DirectMessageUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank(&self.user_id, "User ID is required and cannot be empty")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerChannelCreate {
    pub guild_name: String,
    pub channel_id: String,
    pub channel_name: String,
    pub scrapers: Vec<String>,
}

impl ServerChannelCreate {
    pub fn into_record(self) -> ServerChannel {
        ServerChannel {
            channel_id: self.channel_id,
            channel_name: self.channel_name,
            channel_type: SERVER_CHANNELS.to_string(),
            guild_name: self.guild_name,
            scrapers: self.scrapers,
        }
    }
}

impl Validate for ServerChannelCreate {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank(&self.channel_id, "Channel ID is required and cannot be empty")?;
        require_non_blank(&self.guild_name, "Guild name is required and cannot be empty")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerChannelUpdate {
    pub channel_id: String,
    pub scrapers: Vec<String>,
}

impl Validate for ServerChannelUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank(&self.channel_id, "Channel ID is required and cannot be empty")
    }
}
