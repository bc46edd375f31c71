// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Billing aggregation endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use balcao_config::model::StoreConfig;
use balcao_stores::stats::{consolidated_billing, fetch_store_stats};

use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct BillingQuery {
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// POST /billing body: a proxy command from the bot.
#[derive(Debug, Deserialize)]
pub struct BillingCommand {
    pub command: String,
    #[serde(default, rename = "storeKey")]
    pub store_key: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

/// GET /billing?store=&endpoint=
///
/// One store's normalized stats, or the consolidated merge across all of
/// them when no store is named.
pub async fn billing_get(
    State(state): State<GatewayState>,
    Query(query): Query<BillingQuery>,
) -> Response {
    let endpoint = query.endpoint.as_deref();

    if let Some(store_key) = query.store.as_deref() {
        let Some(store) = state.client.store(store_key) else {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "error": "Loja não encontrada" })),
            )
                .into_response();
        };
        let data = fetch_store_stats(&state.client, store, endpoint).await;
        return Json(json!({
            "success": true,
            "store": store.name,
            "data": data,
        }))
        .into_response();
    }

    let consolidated = consolidated_billing(&state.client, endpoint).await;
    Json(json!({
        "success": true,
        "consolidated": consolidated,
        "endpoint": endpoint.unwrap_or_default(),
    }))
    .into_response()
}

/// Fetch a raw backend endpoint per store, or for one store only.
async fn proxy(state: &GatewayState, store_key: Option<&str>, endpoint: &str) -> Result<Value, Response> {
    if let Some(key) = store_key {
        let Some(store) = state.client.store(key) else {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "error": "Loja não encontrada" })),
            )
                .into_response());
        };
        return Ok(fetch_raw(state, store, endpoint).await.unwrap_or(Value::Null));
    }

    let stores: Vec<&StoreConfig> = state.client.active_stores().collect();
    let datas = join_all(
        stores
            .iter()
            .map(|store| fetch_raw(state, store, endpoint)),
    )
    .await;

    Ok(Value::Array(
        stores
            .iter()
            .zip(datas)
            .map(|(store, data)| {
                json!({
                    "store": store.key,
                    "data": data.unwrap_or(Value::Null),
                })
            })
            .collect(),
    ))
}

async fn fetch_raw(state: &GatewayState, store: &StoreConfig, endpoint: &str) -> Option<Value> {
    match state.client.fetch_json(store, endpoint).await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(store = store.key.as_str(), error = %e, "billing proxy fetch failed");
            None
        }
    }
}

/// POST /billing {command, storeKey?, params?}
pub async fn billing_post(
    State(state): State<GatewayState>,
    Json(body): Json<BillingCommand>,
) -> Response {
    let endpoint = match body.command.as_str() {
        "dashboard_stats" => "/dashboard/stats".to_string(),
        "sales" => "/sales".to_string(),
        "dashboard_data" => {
            let period = body
                .params
                .as_ref()
                .and_then(|p| p.get("period"))
                .and_then(Value::as_str)
                .unwrap_or("today");
            format!("/dashboard/data?period={period}")
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": "Comando não reconhecido" })),
            )
                .into_response();
        }
    };

    match proxy(&state, body.store_key.as_deref(), &endpoint).await {
        Ok(data) => Json(json!({
            "success": true,
            "command": body.command,
            "data": data,
        }))
        .into_response(),
        Err(response) => response,
    }
}
