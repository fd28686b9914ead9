//! Notification-configuration API library.
//!
//! CRUD over notification recipients (Discord direct messages and server
//! channels, Kakao users), notice listings with "new since cursor"
//! filtering, and scraper metadata, behind a local-access gate and a
//! static bearer token.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod notices;
pub mod observability;
pub mod security;
pub mod storage;

pub use config::schema::ApiConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
