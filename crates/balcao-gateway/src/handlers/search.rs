// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment search endpoints.
//!
//! Two shapes coexist: the enveloped consolidated search the dashboard
//! uses, and the raw passthrough under `/stores/{store}/payments/search`
//! the bot's lookup client consumes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use balcao_stores::{search_all, search_store, StoreSearchResult};
use balcao_tickets::is_valid_email;

use crate::envelope::ApiResponse;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailBody {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Append a found payment to the audit table without blocking the response.
fn record_found(state: &GatewayState, result: &StoreSearchResult) {
    let Some(order) = result.order.clone() else { return };
    let db = state.db.clone();
    let store_key = result.store.clone();
    tokio::spawn(async move {
        if let Err(e) = balcao_storage::queries::payments::record_payment(
            &db,
            &order.display_id(),
            &store_key,
            order.amount,
            &order.status,
            &order.customer_email,
            &order.created_at,
        )
        .await
        {
            warn!(error = %e, "failed to record found payment");
        }
    });
}

/// GET /payments/search?email=
///
/// Enveloped consolidated search: 400 on missing/malformed email, 404 when
/// no store reports a paid order.
pub async fn consolidated_search(
    State(state): State<GatewayState>,
    Query(query): Query<EmailQuery>,
) -> Response {
    let Some(email) = query.email.filter(|e| !e.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "Email é obrigatório",
                "Parâmetro email não fornecido",
            )),
        )
            .into_response();
    };

    if !is_valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Email inválido", "Formato de email inválido")),
        )
            .into_response();
    }

    info!(email = email.as_str(), "consolidated payment search");

    let found = search_all(&state.client, &email)
        .await
        .filter(|r| r.status == "paid");

    let Some(result) = found else {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failure_message(
                "Nenhum pagamento encontrado para este email em nenhuma loja",
            )),
        )
            .into_response();
    };

    record_found(&state, &result);

    let mut data = serde_json::to_value(&result).unwrap_or_else(|_| json!({}));
    if let Some(map) = data.as_object_mut() {
        map.insert("storeName".into(), json!(result.store_name));
    }

    (
        StatusCode::OK,
        Json(ApiResponse::ok_with_message(data, "Pagamento encontrado com sucesso")),
    )
        .into_response()
}

/// GET /payments/recent?limit=
pub async fn recent_payments(
    State(state): State<GatewayState>,
    Query(query): Query<RecentQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(10).min(100);
    match balcao_storage::queries::payments::recent_payments(&state.db, limit).await {
        Ok(payments) => {
            let count = payments.len();
            (
                StatusCode::OK,
                Json(ApiResponse::ok_with_message(
                    json!(payments),
                    format!("{count} pagamentos encontrados"),
                )),
            )
                .into_response()
        }
        Err(e) => {
            warn!(error = %e, "failed to list recent payments");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "Erro interno do servidor",
                    "Falha ao buscar pagamentos recentes",
                )),
            )
                .into_response()
        }
    }
}

/// Shared passthrough logic for the per-store routes.
async fn store_search(state: &GatewayState, store_key: &str, email: &str) -> Response {
    if store_key == "all" {
        return match search_all(&state.client, email).await {
            Some(result) => {
                if result.status == "paid" {
                    record_found(state, &result);
                }
                Json(serde_json::to_value(&result).unwrap_or_else(|_| json!({}))).into_response()
            }
            None => Json(json!({
                "status": "not_found",
                "message": "Nenhum pedido encontrado"
            }))
            .into_response(),
        };
    }

    let Some(store) = state.client.store(store_key) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Loja não encontrada" })),
        )
            .into_response();
    };

    match search_store(&state.client, store, email).await {
        Some(result) => {
            Json(serde_json::to_value(&result).unwrap_or_else(|_| json!({}))).into_response()
        }
        None => Json(json!({
            "status": "not_found",
            "store": store.key,
            "store_name": store.name,
        }))
        .into_response(),
    }
}

/// GET /stores/{store}/payments/search?email=
pub async fn store_search_get(
    State(state): State<GatewayState>,
    Path(store_key): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Response {
    let Some(email) = query.email.filter(|e| !e.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email é obrigatório" })),
        )
            .into_response();
    };
    store_search(&state, &store_key, &email).await
}

/// POST /stores/{store}/payments/search {email}
pub async fn store_search_post(
    State(state): State<GatewayState>,
    Path(store_key): Path<String>,
    Json(body): Json<EmailBody>,
) -> Response {
    let Some(email) = body.email.filter(|e| !e.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email é obrigatório" })),
        )
            .into_response();
    };
    store_search(&state, &store_key, &email).await
}
