// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Balcao configuration system.

use balcao_config::diagnostic::{suggest_key, ConfigError};
use balcao_config::model::{BalcaoConfig, StoreAuth};
use balcao_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_balcao_config() {
    let toml = r#"
[service]
name = "balcao-test"
log_level = "debug"

[discord]
token = "bot-token"
client_id = 1234
guild_id = 5678
dashboard_url = "https://painel.example.com"
ticket_category = "Atendimento"
followup_delay_secs = 1

[gateway]
host = "0.0.0.0"
port = 8080
public_url = "https://api.example.com"

[storage]
database_path = "/tmp/balcao-test.db"

[[stores]]
key = "loja-a"
name = "Loja A"
backend_url = "https://a.example"
auth = "bearer"
token = "tok-a"

[[stores]]
key = "loja-b"
name = "Loja B"
backend_url = "https://b.example"
auth = "store-key"
token = "tok-b"
active = false
stats_endpoint = "/dashboard/stats"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.service.name, "balcao-test");
    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.discord.token.as_deref(), Some("bot-token"));
    assert_eq!(config.discord.client_id, Some(1234));
    assert_eq!(config.discord.guild_id, Some(5678));
    assert_eq!(config.discord.ticket_category, "Atendimento");
    assert_eq!(config.discord.followup_delay_secs, 1);
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.base_url(), "https://api.example.com");
    assert_eq!(config.storage.database_path, "/tmp/balcao-test.db");
    assert_eq!(config.stores.len(), 2);
    assert_eq!(config.stores[0].auth, StoreAuth::Bearer);
    assert_eq!(config.stores[1].auth, StoreAuth::StoreKey);
    assert!(!config.stores[1].active);
    assert_eq!(config.stores[1].stats_endpoint, "/dashboard/stats");
}

/// Unknown field in [discord] section produces an error.
#[test]
fn unknown_field_in_discord_produces_error() {
    let toml = r#"
[discord]
tokn = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("tokn"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown field inside a [[stores]] entry produces an error.
#[test]
fn unknown_field_in_store_produces_error() {
    let toml = r#"
[[stores]]
key = "loja"
name = "Loja"
backend_ulr = "https://loja.example"
token = "t"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("backend_ulr"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.service.name, "balcao");
    assert_eq!(config.service.log_level, "info");
    assert!(config.discord.token.is_none());
    assert_eq!(config.discord.ticket_category, "Tickets");
    assert_eq!(config.discord.followup_delay_secs, 3);
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 3000);
    assert_eq!(config.stores.len(), 2);
    assert_eq!(config.stores[0].key, "recarregabux");
    assert_eq!(config.stores[1].key, "lojabux");
}

/// Env-style override (discord.token path) wins over TOML.
#[test]
fn override_path_wins_over_toml() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let toml_content = r#"
[discord]
token = "from-toml"
"#;

    let config: BalcaoConfig = Figment::new()
        .merge(Serialized::defaults(BalcaoConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("discord.token", "from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.discord.token.as_deref(), Some("from-env"));
}

/// Validation catches semantic errors that deserialization cannot.
#[test]
fn validation_collects_multiple_errors() {
    let toml = r#"
[service]
log_level = "loud"

[gateway]
host = ""

[[stores]]
key = ""
name = "Broken"
backend_url = "not-a-url"
token = ""
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.len() >= 4, "expected several errors, got {errors:?}");
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert!(messages.iter().any(|m| m.contains("log_level")));
    assert!(messages.iter().any(|m| m.contains("gateway.host")));
    assert!(messages.iter().any(|m| m.contains("backend_url")));
    assert!(messages.iter().any(|m| m.contains("token")));
}

/// Default config passes full load-and-validate.
#[test]
fn defaults_pass_validation() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.stores.len(), 2);
}

/// Typo suggestions point at the intended key.
#[test]
fn suggestion_for_store_typo() {
    let valid = &["key", "name", "backend_url", "auth", "token", "active"];
    assert_eq!(
        suggest_key("backennd_url", valid),
        Some("backend_url".to_string())
    );
}

/// Validation errors render through Display with their message.
#[test]
fn validation_error_displays_message() {
    let err = ConfigError::Validation {
        message: "gateway.port must be non-zero".to_string(),
    };
    assert!(err.to_string().contains("non-zero"));
}
