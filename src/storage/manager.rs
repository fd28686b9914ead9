//! Typed access to the service's collections.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{Document, DocumentStore, StorageError};
use crate::models::discord::{DIRECT_MESSAGES, SERVER_CHANNELS};
use crate::models::kakao::KAKAO_USERS;
use crate::models::{DirectMessage, KakaoUser, ServerChannel};
use crate::notices::Notice;

pub const RECIPIENT_DB: &str = "notification-recipient";
pub const SCRAPER_DB: &str = "scraper-metadata";
pub const SCRAPER_TYPES: &str = "scraper-types";
pub const SCRAPER_CATEGORIES: &str = "scraper-categories";

/// Sort key used for notice listings.
pub const PUBLISHED_FIELD: &str = "published";

/// Collection operations shared by every handler.
#[derive(Clone)]
pub struct DbManager {
    store: Arc<dyn DocumentStore>,
    notice_db: String,
}

impl DbManager {
    pub fn new(store: Arc<dyn DocumentStore>, notice_db: impl Into<String>) -> Self {
        Self {
            store,
            notice_db: notice_db.into(),
        }
    }

    pub fn notice_db(&self) -> &str {
        &self.notice_db
    }

    // Direct messages

    pub fn read_direct_messages_list(&self) -> Result<Vec<DirectMessage>, StorageError> {
        self.read_all(RECIPIENT_DB, DIRECT_MESSAGES)
    }

    pub fn read_direct_message(&self, user_id: &str) -> Result<Option<DirectMessage>, StorageError> {
        self.read_one(RECIPIENT_DB, DIRECT_MESSAGES, user_id)
    }

    pub fn create_direct_message(&self, record: &DirectMessage) -> Result<(), StorageError> {
        self.insert(RECIPIENT_DB, DIRECT_MESSAGES, record)?;
        tracing::info!(user_name = %record.user_name, "Direct message recipient created");
        Ok(())
    }

    pub fn update_direct_message(&self, user_id: &str, scrapers: &[String]) -> Result<bool, StorageError> {
        let updated = self.set_scrapers(RECIPIENT_DB, DIRECT_MESSAGES, user_id, scrapers)?;
        if updated {
            tracing::info!(user_id, "Direct message recipient updated");
        }
        Ok(updated)
    }

    pub fn delete_direct_message(&self, user_id: &str) -> Result<bool, StorageError> {
        let deleted = self.store.delete_one(RECIPIENT_DB, DIRECT_MESSAGES, user_id)?;
        if deleted {
            tracing::info!(user_id, "Direct message recipient deleted");
        }
        Ok(deleted)
    }

    // Server channels

    pub fn read_server_channels_list(&self) -> Result<Vec<ServerChannel>, StorageError> {
        self.read_all(RECIPIENT_DB, SERVER_CHANNELS)
    }

    pub fn read_server_channel(&self, channel_id: &str) -> Result<Option<ServerChannel>, StorageError> {
        self.read_one(RECIPIENT_DB, SERVER_CHANNELS, channel_id)
    }

    pub fn create_server_channel(&self, record: &ServerChannel) -> Result<(), StorageError> {
        self.insert(RECIPIENT_DB, SERVER_CHANNELS, record)?;
        tracing::info!(guild_name = %record.guild_name, channel_id = %record.channel_id, "Server channel created");
        Ok(())
    }

    pub fn update_server_channel(&self, channel_id: &str, scrapers: &[String]) -> Result<bool, StorageError> {
        let updated = self.set_scrapers(RECIPIENT_DB, SERVER_CHANNELS, channel_id, scrapers)?;
        if updated {
            tracing::info!(channel_id, "Server channel updated");
        }
        Ok(updated)
    }

    pub fn delete_server_channel(&self, channel_id: &str) -> Result<bool, StorageError> {
        let deleted = self.store.delete_one(RECIPIENT_DB, SERVER_CHANNELS, channel_id)?;
        if deleted {
            tracing::info!(channel_id, "Server channel deleted");
        }
        Ok(deleted)
    }

    // Kakao users

    pub fn read_kakao_user(&self, user_id: &str) -> Result<Option<KakaoUser>, StorageError> {
        self.read_one(RECIPIENT_DB, KAKAO_USERS, user_id)
    }

    pub fn create_kakao_user(&self, record: &KakaoUser) -> Result<(), StorageError> {
        self.insert(RECIPIENT_DB, KAKAO_USERS, record)?;
        tracing::info!(user_id = %record.user_id, "Kakao user created");
        Ok(())
    }

    pub fn update_kakao_user(
        &self,
        user_id: &str,
        scrapers: &[String],
        access_token: &str,
    ) -> Result<bool, StorageError> {
        let mut fields = Document::new();
        fields.insert("scrapers".into(), Value::from(scrapers.to_vec()));
        fields.insert("access_token".into(), Value::from(access_token));

        let updated = self.store.update_one(RECIPIENT_DB, KAKAO_USERS, user_id, fields)?;
        if updated {
            tracing::info!(user_id, "Kakao user updated");
        }
        Ok(updated)
    }

    pub fn delete_kakao_user(&self, user_id: &str) -> Result<bool, StorageError> {
        let deleted = self.store.delete_one(RECIPIENT_DB, KAKAO_USERS, user_id)?;
        if deleted {
            tracing::info!(user_id, "Kakao user deleted");
        }
        Ok(deleted)
    }

    // Notices and scraper metadata

    /// Latest notices of a type, newest first.
    pub fn read_notice_list(&self, notice_type: &str, list_size: usize) -> Result<Vec<Notice>, StorageError> {
        self.store
            .find_latest(&self.notice_db, notice_type, PUBLISHED_FIELD, list_size)?
            .into_iter()
            .map(|doc| decode(notice_type, doc))
            .collect()
    }

    pub fn read_scraper_type_list(&self) -> Result<Vec<Document>, StorageError> {
        self.store.find_all(SCRAPER_DB, SCRAPER_TYPES)
    }

    pub fn read_category_list(&self) -> Result<Vec<Document>, StorageError> {
        self.store.find_all(SCRAPER_DB, SCRAPER_CATEGORIES)
    }

    fn read_all<T: DeserializeOwned>(&self, db: &str, collection: &str) -> Result<Vec<T>, StorageError> {
        self.store
            .find_all(db, collection)?
            .into_iter()
            .map(|doc| decode(collection, doc))
            .collect()
    }

    fn read_one<T: DeserializeOwned>(&self, db: &str, collection: &str, id: &str) -> Result<Option<T>, StorageError> {
        self.store
            .find_one(db, collection, id)?
            .map(|doc| decode(collection, doc))
            .transpose()
    }

    fn insert<T: Serialize>(&self, db: &str, collection: &str, record: &T) -> Result<String, StorageError> {
        let doc = encode(collection, record)?;
        self.store.insert_one(db, collection, doc)
    }

    fn set_scrapers(&self, db: &str, collection: &str, id: &str, scrapers: &[String]) -> Result<bool, StorageError> {
        let mut fields = Document::new();
        fields.insert("scrapers".into(), Value::from(scrapers.to_vec()));
        self.store.update_one(db, collection, id, fields)
    }
}

fn decode<T: DeserializeOwned>(collection: &str, doc: Document) -> Result<T, StorageError> {
    serde_json::from_value(Value::Object(doc)).map_err(|source| StorageError::Corrupt {
        collection: collection.to_string(),
        source,
    })
}

fn encode<T: Serialize>(collection: &str, record: &T) -> Result<Document, StorageError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(_) => Err(StorageError::InvalidId {
            collection: collection.to_string(),
        }),
        Err(source) => Err(StorageError::Corrupt {
            collection: collection.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn manager() -> (MemoryStore, DbManager) {
        let store = MemoryStore::new(None);
        let manager = DbManager::new(Arc::new(store.clone()), "dev-kookmin-feed");
        (store, manager)
    }

    fn dm(id: &str) -> DirectMessage {
        DirectMessage {
            user_id: id.into(),
            user_name: format!("user-{id}"),
            channel_type: DIRECT_MESSAGES.into(),
            scrapers: vec!["academic".into()],
        }
    }

    #[test]
    fn test_direct_message_lifecycle() {
        let (_, db) = manager();

        db.create_direct_message(&dm("1")).unwrap();
        assert!(matches!(
            db.create_direct_message(&dm("1")),
            Err(StorageError::DuplicateKey { .. })
        ));

        assert!(db.update_direct_message("1", &["sw".to_string()]).unwrap());
        let read = db.read_direct_message("1").unwrap().unwrap();
        assert_eq!(read.scrapers, vec!["sw".to_string()]);
        assert_eq!(read.user_name, "user-1");

        assert_eq!(db.read_direct_messages_list().unwrap().len(), 1);
        assert!(db.delete_direct_message("1").unwrap());
        assert!(db.read_direct_message("1").unwrap().is_none());
        assert!(!db.update_direct_message("1", &[]).unwrap());
    }

    #[test]
    fn test_kakao_update_replaces_token() {
        let (_, db) = manager();
        let user = KakaoUser {
            user_id: "k".into(),
            channel_type: "kakao".into(),
            scrapers: vec!["a".into()],
            access_token: "old".into(),
        };
        db.create_kakao_user(&user).unwrap();
        assert!(db.update_kakao_user("k", &["b".to_string()], "new").unwrap());

        let read = db.read_kakao_user("k").unwrap().unwrap();
        assert_eq!(read.access_token, "new");
        assert_eq!(read.scrapers, vec!["b".to_string()]);
    }

    #[test]
    fn test_notice_list_reads_notice_db() {
        let (store, db) = manager();
        for (link, published) in [("a", 1), ("b", 3), ("c", 2)] {
            let doc = json!({"link": link, "published": published, "title": link});
            store
                .insert_one("dev-kookmin-feed", "academic", doc.as_object().unwrap().clone())
                .unwrap();
        }

        let notices = db.read_notice_list("academic", 2).unwrap();
        let links: Vec<_> = notices.iter().filter_map(|n| n.link.as_deref()).collect();
        assert_eq!(links, vec!["b", "c"]);
        assert!(notices[0].payload.contains_key("_id"));

        assert!(db.read_notice_list("unknown", 5).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_record_reported() {
        let (store, db) = manager();
        store
            .insert_one(RECIPIENT_DB, DIRECT_MESSAGES, json!({"_id": "x"}).as_object().unwrap().clone())
            .unwrap();
        assert!(matches!(
            db.read_direct_messages_list(),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_scraper_metadata() {
        let (store, db) = manager();
        store
            .insert_one(SCRAPER_DB, SCRAPER_TYPES, json!({"_id": "t1", "name": "academic"}).as_object().unwrap().clone())
            .unwrap();
        assert_eq!(db.read_scraper_type_list().unwrap()[0]["name"], "academic");
        assert!(db.read_category_list().unwrap().is_empty());
    }
}
