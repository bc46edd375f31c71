// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The gateway event handler: slash commands, button presses, and the
//! email-capture message path.
//!
//! Unexpected errors are caught at the top of each dispatch, logged, and
//! answered with a generic apology; a second response attempt on an
//! already-answered interaction fails harmlessly and is ignored.

use std::str::FromStr;
use std::sync::Arc;

use balcao_core::{BalcaoError, BotStatus};
use balcao_tickets::{handle_ticket_message, MessageOutcome};
use chrono::Utc;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse, EventHandler,
    Interaction, Message, Ready,
};
use serenity::async_trait;
use tracing::{debug, error, info};

use crate::actions::{ButtonAction, SlashCommand};
use crate::channels::{cleanup_ticket_channels, create_ticket_channel};
use crate::context::BotContext;
use crate::messages;
use crate::reply::{discord_err, ephemeral_command_reply, ephemeral_component_reply};

/// Serenity event handler holding the shared bot context.
pub struct Handler {
    pub bot: Arc<BotContext>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = ready.user.name.as_str(), "discord bot connected");
        self.bot.set_status(BotStatus::Online);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let channel = balcao_core::ChannelId(msg.channel_id.get());
        let outcome = handle_ticket_message(
            &self.bot.tickets,
            self.bot.lookup.as_ref(),
            channel,
            &msg.content,
            Utc::now(),
        )
        .await;

        if let Err(e) = self.render_outcome(&ctx, &msg, outcome).await {
            error!(error = %e, "failed to answer ticket message");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(cmd) => {
                if let Err(e) = self.dispatch_command(&ctx, &cmd).await {
                    error!(command = cmd.data.name.as_str(), error = %e, "command handler failed");
                    let _ = ephemeral_command_reply(
                        &ctx,
                        &cmd,
                        "❌ Ocorreu um erro ao processar sua solicitação.",
                    )
                    .await;
                }
            }
            Interaction::Component(comp) => {
                if let Err(e) = self.dispatch_component(&ctx, &comp).await {
                    error!(
                        custom_id = comp.data.custom_id.as_str(),
                        error = %e,
                        "component handler failed"
                    );
                    let _ = ephemeral_component_reply(
                        &ctx,
                        &comp,
                        "❌ Ocorreu um erro ao processar sua solicitação.",
                    )
                    .await;
                }
            }
            _ => {}
        }
    }
}

impl Handler {
    async fn render_outcome(
        &self,
        ctx: &Context,
        msg: &Message,
        outcome: MessageOutcome,
    ) -> Result<(), BalcaoError> {
        match outcome {
            MessageOutcome::Ignored => Ok(()),
            MessageOutcome::InvalidEmail => {
                msg.channel_id
                    .send_message(
                        &ctx.http,
                        CreateMessage::new()
                            .embed(messages::invalid_email())
                            .reference_message(msg),
                    )
                    .await
                    .map_err(|e| discord_err("failed to send invalid-email reply", e))?;
                Ok(())
            }
            MessageOutcome::PaymentFound(found) => {
                msg.channel_id
                    .send_message(
                        &ctx.http,
                        CreateMessage::new()
                            .embed(messages::order_found(&found))
                            .reference_message(msg),
                    )
                    .await
                    .map_err(|e| discord_err("failed to send order summary", e))?;

                // The fee prompt trails the summary by a fixed delay. No
                // cancellation: a deleted channel just makes the send fail.
                let http = ctx.http.clone();
                let channel_id = msg.channel_id;
                let delay = self.bot.config.followup_delay_secs;
                tokio::spawn(async move {
                    tokio::time::sleep(std::time::Duration::from_secs(delay)).await;
                    let (embed, row) = messages::fee_prompt();
                    if let Err(e) = channel_id
                        .send_message(
                            &http,
                            CreateMessage::new().embed(embed).components(vec![row]),
                        )
                        .await
                    {
                        debug!(error = %e, "delayed fee prompt send failed");
                    }
                });
                Ok(())
            }
            MessageOutcome::PaymentNotFound { email } => {
                debug!(email = email.as_str(), "no paid order for ticket email");
                msg.channel_id
                    .send_message(
                        &ctx.http,
                        CreateMessage::new()
                            .embed(messages::order_not_found())
                            .reference_message(msg),
                    )
                    .await
                    .map_err(|e| discord_err("failed to send not-found reply", e))?;
                Ok(())
            }
        }
    }

    async fn dispatch_command(
        &self,
        ctx: &Context,
        cmd: &CommandInteraction,
    ) -> Result<(), BalcaoError> {
        let Ok(command) = SlashCommand::from_str(&cmd.data.name) else {
            return ephemeral_command_reply(ctx, cmd, "❌ Comando não reconhecido.").await;
        };

        match command {
            SlashCommand::Suporte => self.suporte(ctx, cmd).await,
            SlashCommand::Setup => self.setup(ctx, cmd).await,
            SlashCommand::Cleanup => self.cleanup(ctx, cmd).await,
            SlashCommand::Status => self.status(ctx, cmd).await,
            SlashCommand::Ping => self.ping(ctx, cmd).await,
            SlashCommand::Dashboard => self.dashboard(ctx, cmd).await,
        }
    }

    async fn dispatch_component(
        &self,
        ctx: &Context,
        comp: &ComponentInteraction,
    ) -> Result<(), BalcaoError> {
        let Ok(action) = ButtonAction::from_str(&comp.data.custom_id) else {
            debug!(custom_id = comp.data.custom_id.as_str(), "unknown button id ignored");
            return Ok(());
        };

        if let Some(kind) = action.ticket_kind() {
            return create_ticket_channel(ctx, &self.bot, comp, kind).await;
        }

        // Everything else is a terminal acknowledgement; the real PIX and
        // verification logic lives outside this service.
        let text = action
            .acknowledgement()
            .unwrap_or("❌ Comando não reconhecido.");
        ephemeral_component_reply(ctx, comp, text).await
    }

    async fn suporte(&self, ctx: &Context, cmd: &CommandInteraction) -> Result<(), BalcaoError> {
        let (embed, row) = messages::support_panel();
        cmd.create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .components(vec![row]),
            ),
        )
        .await
        .map_err(|e| discord_err("failed to send support panel", e))
    }

    async fn setup(&self, ctx: &Context, cmd: &CommandInteraction) -> Result<(), BalcaoError> {
        if !is_admin(cmd) {
            return ephemeral_command_reply(
                ctx,
                cmd,
                "❌ Você não tem permissão para usar este comando.",
            )
            .await;
        }

        let (embed, row) = messages::setup_banner();
        cmd.channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(embed).components(vec![row]),
            )
            .await
            .map_err(|e| discord_err("failed to post setup banner", e))?;

        ephemeral_command_reply(ctx, cmd, "✅ Mensagem de suporte enviada!").await
    }

    async fn cleanup(&self, ctx: &Context, cmd: &CommandInteraction) -> Result<(), BalcaoError> {
        if !is_admin(cmd) {
            return ephemeral_command_reply(
                ctx,
                cmd,
                "❌ Você não tem permissão para usar este comando.",
            )
            .await;
        }

        let Some(guild_id) = cmd.guild_id else {
            return ephemeral_command_reply(
                ctx,
                cmd,
                "❌ Este comando só pode ser usado em um servidor.",
            )
            .await;
        };

        // The sweep can outlive the 3 s interaction window; defer first.
        cmd.defer_ephemeral(&ctx.http)
            .await
            .map_err(|e| discord_err("failed to defer cleanup reply", e))?;

        let deleted = cleanup_ticket_channels(ctx, &self.bot.tickets, guild_id).await?;

        cmd.edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!(
                "✅ Limpeza concluída! {deleted} canais de ticket foram removidos."
            )),
        )
        .await
        .map_err(|e| discord_err("failed to report cleanup result", e))?;
        Ok(())
    }

    async fn status(&self, ctx: &Context, cmd: &CommandInteraction) -> Result<(), BalcaoError> {
        let embed = messages::bot_status(self.bot.uptime_secs(), self.bot.tickets.len());
        cmd.create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(embed),
            ),
        )
        .await
        .map_err(|e| discord_err("failed to send status", e))
    }

    async fn ping(&self, ctx: &Context, cmd: &CommandInteraction) -> Result<(), BalcaoError> {
        let started = std::time::Instant::now();
        cmd.create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().content("🏓 Pong!"),
            ),
        )
        .await
        .map_err(|e| discord_err("failed to send pong", e))?;

        let latency = started.elapsed().as_millis();
        cmd.edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!("🏓 Pong! Latência: {latency}ms")),
        )
        .await
        .map_err(|e| discord_err("failed to edit pong", e))?;
        Ok(())
    }

    async fn dashboard(&self, ctx: &Context, cmd: &CommandInteraction) -> Result<(), BalcaoError> {
        let embed = messages::dashboard_link(&self.bot.config.dashboard_url);
        cmd.create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(embed).ephemeral(true),
            ),
        )
        .await
        .map_err(|e| discord_err("failed to send dashboard link", e))
    }
}

/// Whether the invoking member carries the Administrator permission.
fn is_admin(cmd: &CommandInteraction) -> bool {
    cmd.member
        .as_ref()
        .and_then(|m| m.permissions)
        .is_some_and(|p| p.administrator())
}
