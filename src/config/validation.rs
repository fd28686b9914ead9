//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, sizes > 0)
//! - Validate addresses (bind address, trusted proxies)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ApiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::config::schema::ApiConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("invalid socket address '{}'", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.auth.api_key.trim().is_empty() {
        errors.push(ValidationError::new(
            "auth.api_key",
            "must be set (config file or API_KEY environment variable)",
        ));
    }

    if config.access.allowed_ips.iter().any(|ip| ip.trim().is_empty()) {
        errors.push(ValidationError::new("access.allowed_ips", "entries must not be blank"));
    }

    for proxy in &config.access.trusted_proxies {
        if proxy.parse::<IpAddr>().is_err() {
            errors.push(ValidationError::new(
                "access.trusted_proxies",
                format!("invalid IP address '{proxy}'"),
            ));
        }
    }

    if matches!(&config.storage.db_name, Some(name) if name.trim().is_empty()) {
        errors.push(ValidationError::new("storage.db_name", "must not be blank"));
    }

    let notices = &config.notices;
    if notices.delta_window == 0 {
        errors.push(ValidationError::new("notices.delta_window", "must be greater than 0"));
    }
    if notices.max_list_size == 0 {
        errors.push(ValidationError::new("notices.max_list_size", "must be greater than 0"));
    }
    if notices.default_list_size == 0 || notices.default_list_size > notices.max_list_size {
        errors.push(ValidationError::new(
            "notices.default_list_size",
            format!("must be between 1 and {}", notices.max_list_size),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", config.observability.metrics_address),
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
