// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated HTTP client for store backends.
//!
//! Each store authenticates either with a bearer token or with the legacy
//! `X-Store-Key` header; which one is a per-store configuration fact.

use std::time::Duration;

use balcao_config::model::{StoreAuth, StoreConfig};
use balcao_core::{BalcaoError, Order};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Response shape of a backend's `POST /api/check-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOrder {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

/// HTTP client over the configured store backends.
pub struct StoreClient {
    http: reqwest::Client,
    stores: Vec<StoreConfig>,
}

impl StoreClient {
    /// Build a client over the given stores.
    ///
    /// A single overall request timeout stands in for retry/backoff/circuit
    /// breaking, none of which this service does: a failed backend simply
    /// contributes nothing to that cycle.
    pub fn new(stores: Vec<StoreConfig>) -> Result<Self, BalcaoError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| BalcaoError::Internal(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, stores })
    }

    /// All configured stores, active or not.
    pub fn stores(&self) -> &[StoreConfig] {
        &self.stores
    }

    /// Active stores in configuration order. Fan-outs iterate this, so
    /// "first match" means first in configuration order.
    pub fn active_stores(&self) -> impl Iterator<Item = &StoreConfig> {
        self.stores.iter().filter(|s| s.active)
    }

    /// Look up a store by key.
    pub fn store(&self, key: &str) -> Option<&StoreConfig> {
        self.stores.iter().find(|s| s.key == key)
    }

    fn authed(&self, req: reqwest::RequestBuilder, store: &StoreConfig) -> reqwest::RequestBuilder {
        match store.auth {
            StoreAuth::Bearer => req.bearer_auth(&store.token),
            StoreAuth::StoreKey => req.header("X-Store-Key", &store.token),
        }
    }

    /// `POST {backend}/api/check-order` with the customer email.
    pub async fn check_order(
        &self,
        store: &StoreConfig,
        email: &str,
    ) -> Result<CheckOrder, BalcaoError> {
        let url = format!("{}/api/check-order", store.backend_url);
        debug!(store = store.key.as_str(), url = url.as_str(), "checking order");

        let response = self
            .authed(self.http.post(&url), store)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(|e| upstream(store, e))?
            .error_for_status()
            .map_err(|e| upstream(store, e))?;

        response.json().await.map_err(|e| upstream(store, e))
    }

    /// `GET {backend}{endpoint}` returning raw JSON.
    ///
    /// Used for the dashboard statistics endpoint and for billing proxy
    /// commands whose response shapes this service does not interpret.
    pub async fn fetch_json(
        &self,
        store: &StoreConfig,
        endpoint: &str,
    ) -> Result<serde_json::Value, BalcaoError> {
        let url = format!("{}{}", store.backend_url, endpoint);
        debug!(store = store.key.as_str(), url = url.as_str(), "fetching backend JSON");

        let response = self
            .authed(self.http.get(&url), store)
            .send()
            .await
            .map_err(|e| upstream(store, e))?
            .error_for_status()
            .map_err(|e| upstream(store, e))?;

        response.json().await.map_err(|e| upstream(store, e))
    }
}

fn upstream(store: &StoreConfig, e: reqwest::Error) -> BalcaoError {
    BalcaoError::Upstream {
        store: store.key.clone(),
        source: Box::new(e),
    }
}
