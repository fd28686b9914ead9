//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (API_KEY, DB_NAME, IS_PROD, BIND_ADDRESS)
//!     → validation.rs (semantic checks)
//!     → ApiConfig (validated, immutable)
//!     → passed explicitly to the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AccessConfig;
pub use schema::ApiConfig;
pub use schema::ListenerConfig;
pub use schema::NoticeConfig;
pub use schema::ObservabilityConfig;
pub use schema::StorageConfig;
