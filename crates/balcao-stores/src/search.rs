// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consolidating payment search across store backends.
//!
//! Fans the same check-order request out to every active store, tolerates
//! individual failures, and prefers the first paid result in configuration
//! order.

use balcao_config::model::StoreConfig;
use balcao_core::{Order, PaymentMatch};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::StoreClient;

/// A backend search result tagged with the store that produced it.
///
/// Mirrors the raw passthrough shape the bot consumes: the backend's
/// `{status, order?}` plus `store` / `store_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSearchResult {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    pub store: String,
    pub store_name: String,
}

/// Search a single store. `not_found` and transport errors both collapse to
/// `None`; errors are logged and never surfaced to the caller as distinct.
pub async fn search_store(
    client: &StoreClient,
    store: &StoreConfig,
    email: &str,
) -> Option<StoreSearchResult> {
    match client.check_order(store, email).await {
        Ok(result) if result.status == "not_found" => None,
        Ok(result) => Some(StoreSearchResult {
            status: result.status,
            order: result.order,
            store: store.key.clone(),
            store_name: store.name.clone(),
        }),
        Err(e) => {
            warn!(store = store.key.as_str(), error = %e, "store search failed");
            None
        }
    }
}

/// Fan out the search to all active stores.
///
/// Returns the first result with `status == "paid"`, falling back to the
/// first result of any status, or `None` when every store came up empty.
pub async fn search_all(client: &StoreClient, email: &str) -> Option<StoreSearchResult> {
    let stores: Vec<&StoreConfig> = client.active_stores().collect();
    let results = join_all(
        stores
            .iter()
            .map(|store| search_store(client, store, email)),
    )
    .await;

    let mut results: Vec<StoreSearchResult> = results.into_iter().flatten().collect();
    if let Some(pos) = results.iter().position(|r| r.status == "paid") {
        return Some(results.swap_remove(pos));
    }
    results.into_iter().next()
}

/// The first paid order with a payload, shaped for the ticket flow.
pub async fn find_first_paid(client: &StoreClient, email: &str) -> Option<PaymentMatch> {
    let result = search_all(client, email).await?;
    if result.status != "paid" {
        return None;
    }
    let order = result.order?;
    Some(PaymentMatch {
        order,
        store: result.store,
        store_name: result.store_name,
    })
}
