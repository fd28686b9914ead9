//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the feed API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Static bearer-token authentication.
    pub auth: AuthConfig,

    /// Network-origin access gate.
    pub access: AccessConfig,

    /// Document store settings.
    pub storage: StorageConfig,

    /// Notice listing settings.
    pub notices: NoticeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Bearer-token authentication.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret expected as `Authorization: Bearer <api_key>`.
    /// Usually supplied through the `API_KEY` environment variable.
    pub api_key: String,
}

/// Access gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Reject requests whose origin is not a local address.
    pub enabled: bool,

    /// Extra literal addresses treated as local.
    pub allowed_ips: Vec<String>,

    /// Proxies whose `X-Forwarded-For` header is honoured.
    /// Empty means the header is always trusted.
    pub trusted_proxies: Vec<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_ips: Vec::new(),
            trusted_proxies: Vec::new(),
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database holding the notice collections. Falls back to the
    /// environment-dependent default when unset.
    pub db_name: Option<String>,

    /// Production deployment (selects the default database name).
    pub is_prod: bool,

    /// JSON snapshot loaded at startup and written on shutdown.
    pub snapshot_path: Option<String>,
}

impl StorageConfig {
    /// Name of the database that holds notice collections.
    pub fn notice_db(&self) -> String {
        match &self.db_name {
            Some(name) => name.clone(),
            None if self.is_prod => "kookmin-feed".to_string(),
            None => "dev-kookmin-feed".to_string(),
        }
    }
}

/// Notice listing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// Default `list_size` for `/notices/all`.
    pub default_list_size: usize,

    /// Upper bound accepted for `list_size`.
    pub max_list_size: usize,

    /// Number of latest notices scanned when looking for the cursor.
    pub delta_window: usize,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            default_list_size: 10,
            max_list_size: 100,
            delta_window: 50,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}
