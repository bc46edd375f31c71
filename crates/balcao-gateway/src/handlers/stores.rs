// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store registry endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use balcao_config::model::StoreConfig;

use crate::envelope::ApiResponse;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct StoresQuery {
    /// `?active=false` includes inactive stores; everything else filters.
    #[serde(default)]
    pub active: Option<String>,
}

/// A store record with credentials stripped.
#[derive(Debug, Serialize)]
pub struct SanitizedStore {
    pub id: usize,
    pub store_key: String,
    pub store_name: String,
    pub backend_url: String,
    pub is_active: bool,
}

pub(crate) fn sanitize(stores: &[StoreConfig], active_only: bool) -> Vec<SanitizedStore> {
    stores
        .iter()
        .enumerate()
        .filter(|(_, s)| !active_only || s.active)
        .map(|(i, s)| SanitizedStore {
            id: i + 1,
            store_key: s.key.clone(),
            store_name: s.name.clone(),
            backend_url: s.backend_url.clone(),
            is_active: s.active,
        })
        .collect()
}

/// GET /stores
pub async fn list_stores(
    State(state): State<GatewayState>,
    Query(query): Query<StoresQuery>,
) -> Json<ApiResponse> {
    let active_only = query.active.as_deref() != Some("false");
    let stores = sanitize(state.stores(), active_only);
    let count = stores.len();

    Json(ApiResponse::ok_with_message(
        json!(stores),
        format!("{count} lojas encontradas"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_config::model::StoreAuth;

    fn store(key: &str, active: bool) -> StoreConfig {
        StoreConfig {
            key: key.to_string(),
            name: key.to_uppercase(),
            backend_url: format!("https://{key}.example"),
            auth: StoreAuth::Bearer,
            token: "secret".to_string(),
            active,
            stats_endpoint: "/api/payments/dashboard/stats".to_string(),
        }
    }

    #[test]
    fn sanitize_strips_tokens_and_filters_inactive() {
        let stores = vec![store("a", true), store("b", false)];

        let active = sanitize(&stores, true);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].store_key, "a");
        assert_eq!(active[0].id, 1);

        let all = sanitize(&stores, false);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].id, 2);

        // No credential leaks in the serialized form.
        let json = serde_json::to_string(&all).unwrap();
        assert!(!json.contains("secret"));
    }
}
