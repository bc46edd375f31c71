// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit bot context shared by every handler.
//!
//! The process entry point owns construction and shutdown; handlers only
//! ever see an `Arc<BotContext>`. No module-level singletons.

use std::sync::Arc;
use std::time::Instant;

use balcao_config::model::DiscordConfig;
use balcao_core::{BotStatus, PaymentLookup};
use balcao_tickets::TicketStore;
use tokio::sync::watch;

/// Shared state for the Discord handlers.
pub struct BotContext {
    pub config: DiscordConfig,
    pub tickets: Arc<TicketStore>,
    pub lookup: Arc<dyn PaymentLookup>,
    pub started_at: Instant,
    status_tx: watch::Sender<BotStatus>,
}

impl BotContext {
    /// Build the context plus a receiver other components (the gateway's
    /// liveness endpoint) can watch.
    pub fn new(
        config: DiscordConfig,
        tickets: Arc<TicketStore>,
        lookup: Arc<dyn PaymentLookup>,
    ) -> (Arc<Self>, watch::Receiver<BotStatus>) {
        let (status_tx, status_rx) = watch::channel(BotStatus::Offline);
        let ctx = Arc::new(Self {
            config,
            tickets,
            lookup,
            started_at: Instant::now(),
            status_tx,
        });
        (ctx, status_rx)
    }

    /// Publish a new connection status.
    pub fn set_status(&self, status: BotStatus) {
        // Receivers may all be gone during shutdown; that is fine.
        let _ = self.status_tx.send(status);
    }

    /// Current connection status.
    pub fn status(&self) -> BotStatus {
        *self.status_tx.borrow()
    }

    /// Seconds since the context was built.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
