// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord support bot for the Balcao daemon.
//!
//! Drives the ticket lifecycle over serenity: private ticket channels,
//! email capture, payment lookup replies, timed follow-ups, and the
//! administrative commands. The state machine itself lives in
//! `balcao-tickets`; this crate renders its outcomes.

pub mod actions;
pub mod channels;
pub mod commands;
pub mod context;
pub mod handler;
pub mod lookup;
pub mod messages;
pub mod reply;

use std::sync::Arc;

use balcao_config::model::DiscordConfig;
use balcao_core::{BalcaoError, BotStatus, PaymentLookup};
use balcao_tickets::TicketStore;
use serenity::all::GatewayIntents;
use serenity::Client;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub use context::BotContext;
pub use handler::Handler;
pub use lookup::HttpPaymentLookup;

/// The connected (but not yet started) support bot.
pub struct SupportBot {
    client: Client,
    ctx: Arc<BotContext>,
}

impl SupportBot {
    /// Build the serenity client.
    ///
    /// Returns `Ok(None)` when no token is configured: the bot stays
    /// offline and the rest of the process keeps running.
    pub async fn connect(
        config: DiscordConfig,
        tickets: Arc<TicketStore>,
        lookup: Arc<dyn PaymentLookup>,
    ) -> Result<Option<(Self, watch::Receiver<BotStatus>)>, BalcaoError> {
        let Some(token) = config.token.clone() else {
            info!("discord.token not configured; bot stays offline");
            return Ok(None);
        };

        let (ctx, status_rx) = BotContext::new(config, tickets, lookup);

        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
            | GatewayIntents::GUILD_MEMBERS;

        let client = Client::builder(&token, intents)
            .event_handler(Handler { bot: ctx.clone() })
            .await
            .map_err(|e| BalcaoError::Discord {
                message: "failed to build discord client".into(),
                source: Some(Box::new(e)),
            })?;

        ctx.set_status(BotStatus::Connecting);
        Ok(Some((Self { client, ctx }, status_rx)))
    }

    /// The shared bot context.
    pub fn context(&self) -> Arc<BotContext> {
        self.ctx.clone()
    }

    /// Run the gateway connection until cancelled.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<(), BalcaoError> {
        let shard_manager = self.client.shard_manager.clone();

        tokio::select! {
            result = self.client.start() => {
                self.ctx.set_status(BotStatus::Offline);
                result.map_err(|e| {
                    error!(error = %e, "discord client stopped with error");
                    BalcaoError::Discord {
                        message: "discord client stopped".into(),
                        source: Some(Box::new(e)),
                    }
                })
            }
            _ = cancel.cancelled() => {
                info!("shutting down discord bot");
                shard_manager.shutdown_all().await;
                self.ctx.set_status(BotStatus::Offline);
                Ok(())
            }
        }
    }
}
