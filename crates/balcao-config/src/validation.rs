// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, unique store keys, and
//! http(s) backend URLs.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::BalcaoConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BalcaoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.service.log_level
            ),
        });
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.port must be non-zero".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let mut seen_keys = HashSet::new();
    for (i, store) in config.stores.iter().enumerate() {
        if store.key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("stores[{i}].key must not be empty"),
            });
        } else if !seen_keys.insert(&store.key) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate store key `{}` in [[stores]] array", store.key),
            });
        }

        if !store.backend_url.starts_with("http://") && !store.backend_url.starts_with("https://")
        {
            errors.push(ConfigError::Validation {
                message: format!(
                    "stores[{i}].backend_url must be an http(s) URL, got `{}`",
                    store.backend_url
                ),
            });
        }

        if store.token.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("stores[{i}].token must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
