// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./balcao.toml` > `~/.config/balcao/balcao.toml`
//! > `/etc/balcao/balcao.toml` with environment variable overrides via the
//! `BALCAO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BalcaoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/balcao/balcao.toml` (system-wide)
/// 3. `~/.config/balcao/balcao.toml` (user XDG config)
/// 4. `./balcao.toml` (local directory)
/// 5. `BALCAO_*` environment variables
pub fn load_config() -> Result<BalcaoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BalcaoConfig::default()))
        .merge(Toml::file("/etc/balcao/balcao.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("balcao/balcao.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("balcao.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<BalcaoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BalcaoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BalcaoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BalcaoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay unambiguous: `BALCAO_DISCORD_CLIENT_ID` must map to
/// `discord.client_id`, not `discord.client.id`.
fn env_provider() -> Env {
    Env::prefixed("BALCAO_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("discord_", "discord.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_loader_applies_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.service.name, "balcao");
        assert_eq!(config.gateway.port, 3000);
        assert_eq!(config.stores.len(), 2);
    }

    #[test]
    fn str_loader_overrides_sections() {
        let config = load_config_from_str(
            r#"
[gateway]
port = 8080

[discord]
token = "test-token"
"#,
        )
        .unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.discord.token.as_deref(), Some("test-token"));
        // Untouched sections keep their defaults.
        assert_eq!(config.service.log_level, "info");
    }

    #[test]
    fn stores_array_replaces_defaults_entirely() {
        let config = load_config_from_str(
            r#"
[[stores]]
key = "solo"
name = "Solo"
backend_url = "https://solo.example"
token = "t"
"#,
        )
        .unwrap();
        assert_eq!(config.stores.len(), 1);
        assert_eq!(config.stores[0].key, "solo");
    }
}
