// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Balcao workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A Discord channel identifier, kept as a plain integer so the ticket
/// crate stays free of platform types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A Discord user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Connection state of the Discord bot, reported by the liveness endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BotStatus {
    /// No token configured; the bot never logged in.
    Offline,
    /// Login started, gateway handshake not yet complete.
    Connecting,
    /// Gateway session established.
    Online,
}

/// An order as returned by a store backend's check-order endpoint.
///
/// Externally owned, read-only. Amounts are in BRL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: serde_json::Value,
    pub amount: f64,
    pub status: String,
    pub customer_email: String,
    pub created_at: String,
}

impl Order {
    /// Renders the order id for display regardless of whether the backend
    /// sent it as a number or a string.
    pub fn display_id(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A paid order located by the consolidating search, tagged with the store
/// that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMatch {
    pub order: Order,
    pub store: String,
    pub store_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_status_serializes_snake_case() {
        let json = serde_json::to_string(&BotStatus::Online).unwrap();
        assert_eq!(json, "\"online\"");
        let parsed: BotStatus = serde_json::from_str("\"connecting\"").unwrap();
        assert_eq!(parsed, BotStatus::Connecting);
    }

    #[test]
    fn bot_status_display_round_trips() {
        use std::str::FromStr;
        for status in [BotStatus::Offline, BotStatus::Connecting, BotStatus::Online] {
            let s = status.to_string();
            assert_eq!(BotStatus::from_str(&s).unwrap(), status);
        }
    }

    #[test]
    fn order_display_id_handles_numeric_and_string_ids() {
        let numeric = Order {
            id: serde_json::json!(1042),
            amount: 25.0,
            status: "paid".into(),
            customer_email: "a@b.com".into(),
            created_at: "2026-01-01T00:00:00Z".into(),
        };
        assert_eq!(numeric.display_id(), "1042");

        let string = Order {
            id: serde_json::json!("ord-7"),
            ..numeric
        };
        assert_eq!(string.display_id(), "ord-7");
    }

    #[test]
    fn ids_display_as_plain_integers() {
        assert_eq!(ChannelId(42).to_string(), "42");
        assert_eq!(UserId(7).to_string(), "7");
    }
}
