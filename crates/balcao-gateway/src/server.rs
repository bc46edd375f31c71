// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, permissive CORS (the Discord bot and the dashboard call
//! these endpoints cross-origin), and shared state.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use balcao_config::model::{DiscordConfig, StoreConfig};
use balcao_core::{BalcaoError, BotStatus};
use balcao_storage::Database;
use balcao_stores::StoreClient;
use balcao_tickets::TicketStore;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Client over the configured store backends.
    pub client: Arc<StoreClient>,
    /// Passive record database.
    pub db: Arc<Database>,
    /// In-memory ticket store (liveness endpoint reports its size).
    pub tickets: Arc<TicketStore>,
    /// Latest bot connection status.
    pub bot_status: watch::Receiver<BotStatus>,
    /// Discord settings for the command-management endpoints.
    pub discord: DiscordConfig,
}

impl GatewayState {
    /// The store configs backing the registry endpoint.
    pub fn stores(&self) -> &[StoreConfig] {
        self.client.stores()
    }
}

/// Build the gateway router over the shared state.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/stores", get(handlers::stores::list_stores))
        .route("/payments/search", get(handlers::search::consolidated_search))
        .route("/payments/recent", get(handlers::search::recent_payments))
        .route(
            "/stores/{store}/payments/search",
            get(handlers::search::store_search_get).post(handlers::search::store_search_post),
        )
        .route(
            "/billing",
            get(handlers::billing::billing_get).post(handlers::billing::billing_post),
        )
        .route(
            "/discord/commands",
            post(handlers::discord::register_commands)
                .get(handlers::discord::list_commands)
                .delete(handlers::discord::clear_commands),
        )
        .route(
            "/discord/bot",
            get(handlers::discord::bot_liveness_get).post(handlers::discord::bot_liveness_post),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server and serve until the token is cancelled.
pub async fn start_server(
    host: &str,
    port: u16,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), BalcaoError> {
    let app = router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BalcaoError::Gateway {
            message: format!("failed to bind gateway to {addr}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!(addr = addr.as_str(), "gateway server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .map_err(|e| BalcaoError::Gateway {
            message: "gateway server error".into(),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
