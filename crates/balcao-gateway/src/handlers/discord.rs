// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord command management and bot liveness endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use balcao_discord::commands;

use crate::envelope::ApiResponse;
use crate::server::GatewayState;

/// POST /discord/commands
pub async fn register_commands(State(state): State<GatewayState>) -> Response {
    match commands::register_commands(&state.discord).await {
        Ok(count) => Json(ApiResponse::ok_with_message(
            json!({ "registered": count }),
            "Comandos registrados com sucesso",
        ))
        .into_response(),
        Err(e) => {
            error!(error = %e, "slash command registration failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "Erro ao registrar comandos",
                    e.to_string(),
                )),
            )
                .into_response()
        }
    }
}

/// GET /discord/commands
pub async fn list_commands() -> Json<ApiResponse> {
    let catalog = commands::command_catalog();
    let count = catalog.len();
    Json(ApiResponse::ok_with_message(
        json!(catalog),
        format!("{count} comandos definidos"),
    ))
}

/// DELETE /discord/commands
pub async fn clear_commands(State(state): State<GatewayState>) -> Response {
    match commands::clear_commands(&state.discord).await {
        Ok(()) => Json(ApiResponse::ok_with_message(
            json!({}),
            "Comandos removidos com sucesso",
        ))
        .into_response(),
        Err(e) => {
            error!(error = %e, "slash command clearing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Erro ao limpar comandos", e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /discord/bot
///
/// The bot's lifecycle is owned by the process entry point, so this only
/// reports status; it never starts anything.
pub async fn bot_liveness_post(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    let status = *state.bot_status.borrow();
    Json(json!({
        "success": true,
        "message": "Bot Discord está rodando",
        "status": status,
    }))
}

/// GET /discord/bot
pub async fn bot_liveness_get(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    let status = *state.bot_status.borrow();
    Json(json!({
        "success": true,
        "message": "Bot Discord está rodando",
        "status": status,
        "tickets": state.tickets.len(),
    }))
}
