//! KakaoTalk notification recipients.

use serde::{Deserialize, Serialize};

use super::{require_non_blank, Validate};
use crate::http::response::ApiError;

pub const KAKAO_USERS: &str = "kakao-users";
pub const KAKAO_CHANNEL_TYPE: &str = "kakao";

/// Stored Kakao recipient, keyed by Kakao user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KakaoUser {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub channel_type: String,
    #[serde(default)]
    pub scrapers: Vec<String>,
    #[serde(default)]
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoUserCreate {
    pub user_id: String,
    pub scrapers: Vec<String>,
    pub access_token: String,
}

impl KakaoUserCreate {
    pub fn into_record(self) -> KakaoUser {
        KakaoUser {
            user_id: self.user_id,
            channel_type: KAKAO_CHANNEL_TYPE.to_string(),
            scrapers: self.scrapers,
            access_token: self.access_token,
        }
    }
}

/// Same shape as [`KakaoUserCreate`]; scrapers and token are replaced.
pub type KakaoUserUpdate = KakaoUserCreate;

impl Validate for KakaoUserCreate {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank(&self.user_id, "User ID is required and cannot be empty")?;
        if self.scrapers.is_empty() {
            return Err(ApiError::bad_request("At least one scraper is required"));
        }
        require_non_blank(&self.access_token, "Access token is required and cannot be empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> KakaoUserCreate {
        KakaoUserCreate {
            user_id: "kakao_user_123".into(),
            scrapers: vec!["scraper1".into()],
            access_token: "token".into(),
        }
    }

    #[test]
    fn test_valid_user() {
        assert!(create().validate().is_ok());
        let record = create().into_record();
        assert_eq!(record.channel_type, "kakao");
        assert_eq!(record.access_token, "token");
    }

    #[test]
    fn test_validation_messages() {
        let mut data = create();
        data.scrapers.clear();
        assert_eq!(data.validate().unwrap_err().to_string(), "At least one scraper is required");

        let mut data = create();
        data.access_token = " ".into();
        assert_eq!(
            data.validate().unwrap_err().to_string(),
            "Access token is required and cannot be empty"
        );

        let mut data = create();
        data.user_id = String::new();
        assert_eq!(
            data.validate().unwrap_err().to_string(),
            "User ID is required and cannot be empty"
        );
    }
}
