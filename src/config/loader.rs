//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ApiConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    Env { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<ApiConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from an optional TOML file, apply environment
/// overrides from the process environment, then validate.
pub fn load_config(path: Option<&Path>) -> Result<ApiConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ApiConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using the given lookup.
///
/// Recognised variables: `API_KEY`, `DB_NAME`, `IS_PROD`, `BIND_ADDRESS`.
pub fn apply_env_overrides<F>(config: &mut ApiConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("API_KEY") {
        config.auth.api_key = key;
    }

    if let Some(db_name) = lookup("DB_NAME") {
        config.storage.db_name = Some(db_name);
    }

    if let Some(value) = lookup("IS_PROD") {
        config.storage.is_prod = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" | "" => false,
            _ => return Err(ConfigError::Env { key: "IS_PROD", value }),
        };
    }

    if let Some(addr) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ApiConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("API_KEY", "k"), ("IS_PROD", "true"), ("BIND_ADDRESS", "127.0.0.1:9000")]),
        )
        .unwrap();

        assert_eq!(config.auth.api_key, "k");
        assert!(config.storage.is_prod);
        assert_eq!(config.storage.notice_db(), "kookmin-feed");
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_db_name_override_wins() {
        let mut config = ApiConfig::default();
        apply_env_overrides(&mut config, env(&[("DB_NAME", "staging"), ("IS_PROD", "1")])).unwrap();
        assert_eq!(config.storage.notice_db(), "staging");
    }

    #[test]
    fn test_invalid_is_prod() {
        let mut config = ApiConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("IS_PROD", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { key: "IS_PROD", .. }));
    }

    #[test]
    fn test_parse_error_reported() {
        let err = parse_config("[listener\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError {
                field: "auth.api_key",
                message: "must be set".into(),
            },
            ValidationError {
                field: "notices.delta_window",
                message: "must be greater than 0".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: auth.api_key: must be set, notices.delta_window: must be greater than 0"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [listener]
            bind_address = "127.0.0.1:8100"

            [auth]
            api_key = "from-file"
            "#
        )
        .unwrap();

        let config = parse_config(&fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8100");
        assert_eq!(config.auth.api_key, "from-file");
        assert!(validate_config(&config).is_ok());
    }
}
