// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket channel creation and the administrative cleanup sweep.

use balcao_tickets::{channel_name, is_ticket_channel, Ticket, TicketKind, TicketStore};
use chrono::{Timelike, Utc};
use serenity::all::{
    ChannelType, ComponentInteraction, Context, CreateChannel, CreateMessage, GuildId,
    PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, User,
};
use tracing::{error, info, warn};

use balcao_core::BalcaoError;

use crate::context::BotContext;
use crate::messages;
use crate::reply::{discord_err, ephemeral_component_reply};

/// Discriminator string matching the naming convention: legacy users keep
/// their zero-padded four digits, pomelo users get "0".
pub fn discriminator_string(user: &User) -> String {
    user.discriminator
        .map(|d| format!("{:04}", d.get()))
        .unwrap_or_else(|| "0".to_string())
}

/// The channel id already carrying `name`, if any.
///
/// This is the duplicate-ticket guard: a channel with the conventional name
/// means the user's ticket of that kind is still open.
pub fn existing_ticket_channel<'a, I>(channels: I, name: &str) -> Option<u64>
where
    I: IntoIterator<Item = (u64, &'a str)>,
{
    channels
        .into_iter()
        .find(|(_, candidate)| *candidate == name)
        .map(|(id, _)| id)
}

/// Create a ticket channel for the interacting user.
///
/// Rejections (no guild, duplicate ticket, missing permission) reply to the
/// user and return Ok; only unexpected Discord failures become errors.
pub async fn create_ticket_channel(
    ctx: &Context,
    bot: &BotContext,
    comp: &ComponentInteraction,
    kind: TicketKind,
) -> Result<(), BalcaoError> {
    let Some(guild_id) = comp.guild_id else {
        return ephemeral_component_reply(
            ctx,
            comp,
            "❌ Este comando só pode ser usado em um servidor.",
        )
        .await;
    };

    let name = channel_name(kind, &comp.user.name, &discriminator_string(&comp.user));

    let channels = guild_id
        .channels(&ctx.http)
        .await
        .map_err(|e| discord_err("failed to list guild channels", e))?;

    // One open ticket per (user, kind): a channel with the conventional name
    // means one is already open. Best-effort, not transactional.
    if let Some(existing) = existing_ticket_channel(
        channels.iter().map(|(id, c)| (id.get(), c.name.as_str())),
        &name,
    ) {
        return ephemeral_component_reply(
            ctx,
            comp,
            format!("Você já possui um ticket aberto: <#{existing}>"),
        )
        .await;
    }

    if !comp.app_permissions.is_some_and(|p| p.manage_channels()) {
        return ephemeral_component_reply(
            ctx,
            comp,
            "❌ Não tenho permissão para criar canais neste servidor.",
        )
        .await;
    }

    let bot_id = ctx.cache.current_user().id;
    let everyone = RoleId::new(guild_id.get());
    let member_allow =
        Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::READ_MESSAGE_HISTORY;

    let mut overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(everyone),
        },
        PermissionOverwrite {
            allow: member_allow,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(comp.user.id),
        },
        PermissionOverwrite {
            allow: member_allow,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot_id),
        },
    ];

    // Let the first administrator role see the ticket too.
    match guild_id.roles(&ctx.http).await {
        Ok(roles) => {
            if let Some(admin) = roles.values().find(|r| r.permissions.administrator()) {
                overwrites.push(PermissionOverwrite {
                    allow: member_allow,
                    deny: Permissions::empty(),
                    kind: PermissionOverwriteType::Role(admin.id),
                });
            }
        }
        Err(e) => warn!(error = %e, "could not list roles; skipping admin overwrite"),
    }

    let mut builder = CreateChannel::new(name.as_str())
        .kind(ChannelType::Text)
        .permissions(overwrites);
    if let Some(category) = channels
        .values()
        .find(|c| c.kind == ChannelType::Category && c.name == bot.config.ticket_category)
    {
        builder = builder.category(category.id);
    }

    let channel = match guild_id.create_channel(&ctx.http, builder).await {
        Ok(channel) => channel,
        Err(e) => {
            error!(error = %e, "failed to create ticket channel");
            return ephemeral_component_reply(
                ctx,
                comp,
                "❌ Erro ao criar o ticket. Por favor, tente novamente ou entre em contato \
                 com um administrador.",
            )
            .await;
        }
    };

    bot.tickets.insert(
        balcao_core::ChannelId(channel.id.get()),
        Ticket::open(kind, balcao_core::UserId(comp.user.id.get()), Utc::now()),
    );
    info!(channel = name.as_str(), kind = %kind, "ticket opened");

    let hour = chrono::Local::now().hour();
    match kind {
        TicketKind::PurchaseMade => {
            channel
                .id
                .send_message(
                    &ctx.http,
                    CreateMessage::new().embeds(messages::purchase_greeting(hour)),
                )
                .await
                .map_err(|e| discord_err("failed to post ticket greeting", e))?;
        }
        TicketKind::NoPurchase => {
            channel
                .id
                .send_message(
                    &ctx.http,
                    CreateMessage::new().embed(messages::question_greeting(hour)),
                )
                .await
                .map_err(|e| discord_err("failed to post ticket greeting", e))?;

            // Fire-and-forget: if the channel disappears in the interim, the
            // send fails and is only logged.
            let http = ctx.http.clone();
            let channel_id = channel.id;
            let delay = bot.config.followup_delay_secs;
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_secs(delay)).await;
                let (embed, row) = messages::question_menu();
                if let Err(e) = channel_id
                    .send_message(&http, CreateMessage::new().embed(embed).components(vec![row]))
                    .await
                {
                    warn!(error = %e, "delayed question menu send failed");
                }
            });
        }
    }

    ephemeral_component_reply(ctx, comp, format!("Ticket criado com sucesso! <#{}>", channel.id))
        .await
}

/// Delete every channel following the ticket naming convention and drop the
/// corresponding store entries. Per-channel failures are logged and skipped.
///
/// Returns the number of channels actually deleted.
pub async fn cleanup_ticket_channels(
    ctx: &Context,
    tickets: &TicketStore,
    guild_id: GuildId,
) -> Result<u64, BalcaoError> {
    let channels = guild_id
        .channels(&ctx.http)
        .await
        .map_err(|e| discord_err("failed to list guild channels", e))?;

    let mut deleted = 0u64;
    for (id, channel) in channels {
        if channel.kind != ChannelType::Text || !is_ticket_channel(&channel.name) {
            continue;
        }
        match id.delete(&ctx.http).await {
            Ok(_) => {
                tickets.remove(balcao_core::ChannelId(id.get()));
                deleted += 1;
            }
            Err(e) => {
                error!(channel = channel.name.as_str(), error = %e, "failed to delete ticket channel");
            }
        }
    }

    info!(deleted, "ticket cleanup sweep finished");
    Ok(deleted)
}
