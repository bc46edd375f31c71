// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Balcao support daemon.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Balcao configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to the values
/// the production deployment ships with.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BalcaoConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Discord bot settings.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// SQLite storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Remote store backends, one entry per tenant.
    #[serde(default = "default_stores")]
    pub stores: Vec<StoreConfig>,
}

impl Default for BalcaoConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            discord: DiscordConfig::default(),
            gateway: GatewayConfig::default(),
            storage: StorageConfig::default(),
            stores: default_stores(),
        }
    }
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "balcao".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Discord bot configuration.
///
/// A missing `token` disables bot login without crashing the process; the
/// gateway keeps serving.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscordConfig {
    /// Bot token. `None` leaves the bot offline.
    #[serde(default)]
    pub token: Option<String>,

    /// Application (client) id, required for slash command registration.
    #[serde(default)]
    pub client_id: Option<u64>,

    /// When set, slash commands are registered for this guild only
    /// (development); otherwise globally (production).
    #[serde(default)]
    pub guild_id: Option<u64>,

    /// URL handed out by the /dashboard command.
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,

    /// Name of the category ticket channels are created under, if present.
    #[serde(default = "default_ticket_category")]
    pub ticket_category: String,

    /// Delay before timed follow-up messages (fee prompt, question menu).
    #[serde(default = "default_followup_delay_secs")]
    pub followup_delay_secs: u64,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            client_id: None,
            guild_id: None,
            dashboard_url: default_dashboard_url(),
            ticket_category: default_ticket_category(),
            followup_delay_secs: default_followup_delay_secs(),
        }
    }
}

fn default_dashboard_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_ticket_category() -> String {
    "Tickets".to_string()
}

fn default_followup_delay_secs() -> u64 {
    3
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Base URL the bot uses for its consolidating search calls. Defaults
    /// to `http://{host}:{port}` when unset.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl GatewayConfig {
    /// The base URL other components should use to reach this gateway.
    pub fn base_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            public_url: None,
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    3000
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("balcao").join("balcao.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "balcao.db".to_string())
}

/// How a store backend authenticates requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreAuth {
    /// `Authorization: Bearer <token>`.
    Bearer,
    /// `X-Store-Key: <token>`.
    StoreKey,
}

/// One tenant's remote e-commerce backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Stable key identifying the store in API paths and query params.
    pub key: String,

    /// Display name shown in bot replies and the dashboard.
    pub name: String,

    /// Base URL of the store's backend.
    pub backend_url: String,

    /// Authentication scheme for backend requests.
    #[serde(default = "default_store_auth")]
    pub auth: StoreAuth,

    /// Credential sent under the scheme above.
    pub token: String,

    /// Inactive stores are skipped by every fan-out.
    #[serde(default = "default_store_active")]
    pub active: bool,

    /// Path of the dashboard statistics endpoint on the backend.
    #[serde(default = "default_stats_endpoint")]
    pub stats_endpoint: String,
}

fn default_store_auth() -> StoreAuth {
    StoreAuth::Bearer
}

fn default_store_active() -> bool {
    true
}

fn default_stats_endpoint() -> String {
    "/api/payments/dashboard/stats".to_string()
}

/// The two production stores, used when no `[[stores]]` entries are given.
fn default_stores() -> Vec<StoreConfig> {
    vec![
        StoreConfig {
            key: "recarregabux".to_string(),
            name: "RecarregaBux".to_string(),
            backend_url: "https://recarregabux.com".to_string(),
            auth: StoreAuth::Bearer,
            token: "kasumispace-token-2024".to_string(),
            active: true,
            stats_endpoint: default_stats_endpoint(),
        },
        StoreConfig {
            key: "lojabux".to_string(),
            name: "RecargaBX".to_string(),
            backend_url: "https://rebuxbr.com".to_string(),
            auth: StoreAuth::StoreKey,
            token: "RecargBx".to_string(),
            active: true,
            stats_endpoint: default_stats_endpoint(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_both_production_stores() {
        let config = BalcaoConfig::default();
        assert_eq!(config.stores.len(), 2);
        assert_eq!(config.stores[0].key, "recarregabux");
        assert_eq!(config.stores[0].auth, StoreAuth::Bearer);
        assert_eq!(config.stores[1].key, "lojabux");
        assert_eq!(config.stores[1].auth, StoreAuth::StoreKey);
        assert!(config.stores.iter().all(|s| s.active));
    }

    #[test]
    fn gateway_base_url_prefers_public_url() {
        let mut gw = GatewayConfig::default();
        assert_eq!(gw.base_url(), "http://127.0.0.1:3000");
        gw.public_url = Some("https://painel.example.com".to_string());
        assert_eq!(gw.base_url(), "https://painel.example.com");
    }

    #[test]
    fn store_auth_deserializes_kebab_case() {
        let toml_str = r#"
key = "loja"
name = "Loja"
backend_url = "https://loja.example"
auth = "store-key"
token = "k"
"#;
        let store: StoreConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(store.auth, StoreAuth::StoreKey);
        assert!(store.active);
        assert_eq!(store.stats_endpoint, "/api/payments/dashboard/stats");
    }

    #[test]
    fn discord_defaults() {
        let d = DiscordConfig::default();
        assert!(d.token.is_none());
        assert_eq!(d.ticket_category, "Tickets");
        assert_eq!(d.followup_delay_secs, 3);
    }
}
