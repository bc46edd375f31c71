// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `balcao serve` command implementation.
//!
//! Wires configuration, the passive record database, the store client, the
//! in-memory ticket store, the Discord bot, and the HTTP gateway, then runs
//! until a shutdown signal. The entry point owns every component's
//! lifecycle; nothing lives in module-level globals.

use std::sync::Arc;

use balcao_config::model::{BalcaoConfig, StoreConfig};
use balcao_core::{BalcaoError, BotStatus};
use balcao_discord::{HttpPaymentLookup, SupportBot};
use balcao_gateway::GatewayState;
use balcao_storage::{queries, Database};
use balcao_stores::StoreClient;
use balcao_tickets::TicketStore;
use tokio::sync::watch;
use tracing::{error, info};

use crate::shutdown;

/// Runs the `balcao serve` command.
pub async fn run_serve(config: BalcaoConfig) -> Result<(), BalcaoError> {
    init_tracing(&config.service.log_level);

    info!(service = config.service.name.as_str(), "starting balcao serve");

    // Passive record database: open, migrate, sync the store registry in.
    let db = Arc::new(Database::open(&config.storage.database_path).await?);
    sync_stores(&db, &config.stores).await?;

    let client = Arc::new(StoreClient::new(config.stores.clone())?);
    let tickets = Arc::new(TicketStore::new());

    // The bot looks payments up through the gateway's own search endpoint.
    let lookup = Arc::new(HttpPaymentLookup::new(config.gateway.base_url())?);

    let connected =
        SupportBot::connect(config.discord.clone(), tickets.clone(), lookup).await?;

    // With no token the bot never logs in; the gateway still serves and the
    // liveness endpoint reports offline.
    let (_offline_tx, offline_rx) = watch::channel(BotStatus::Offline);
    let (bot, bot_status) = match connected {
        Some((bot, status_rx)) => (Some(bot), status_rx),
        None => (None, offline_rx),
    };

    let cancel = shutdown::install_signal_handler();

    let state = GatewayState {
        client,
        db: db.clone(),
        tickets,
        bot_status,
        discord: config.discord.clone(),
    };

    let gateway_cancel = cancel.clone();
    let host = config.gateway.host.clone();
    let port = config.gateway.port;
    let gateway_handle = tokio::spawn(async move {
        if let Err(e) = balcao_gateway::start_server(&host, port, state, gateway_cancel).await {
            error!(error = %e, "gateway server error");
        }
    });

    match bot {
        Some(bot) => {
            // A bot failure leaves it offline; the gateway keeps serving
            // until the shutdown signal.
            if let Err(e) = bot.run(cancel.clone()).await {
                error!(error = %e, "discord bot exited with error");
                cancel.cancelled().await;
            }
        }
        None => cancel.cancelled().await,
    }

    let _ = gateway_handle.await;

    db.close().await?;
    info!("balcao serve shutdown complete");
    Ok(())
}

/// Mirror the configured stores into the passive `stores` table.
async fn sync_stores(db: &Database, stores: &[StoreConfig]) -> Result<(), BalcaoError> {
    for store in stores {
        queries::stores::upsert_store(db, &store.key, &store.name, &store.backend_url, store.active)
            .await?;
    }
    let count = queries::stores::list_stores(db, false).await?.len();
    info!(count, "store records synced");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("balcao={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
