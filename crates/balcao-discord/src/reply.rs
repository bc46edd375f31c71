// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small helpers for interaction replies.

use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};

use balcao_core::BalcaoError;

/// Wrap a serenity error with context.
pub(crate) fn discord_err(message: &str, e: serenity::Error) -> BalcaoError {
    BalcaoError::Discord {
        message: message.to_string(),
        source: Some(Box::new(e)),
    }
}

/// Ephemeral text reply to a slash command.
pub async fn ephemeral_command_reply(
    ctx: &Context,
    cmd: &CommandInteraction,
    content: impl Into<String>,
) -> Result<(), BalcaoError> {
    cmd.create_response(
        &ctx.http,
        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true),
        ),
    )
    .await
    .map_err(|e| discord_err("failed to reply to command", e))
}

/// Ephemeral text reply to a button press.
pub async fn ephemeral_component_reply(
    ctx: &Context,
    comp: &ComponentInteraction,
    content: impl Into<String>,
) -> Result<(), BalcaoError> {
    comp.create_response(
        &ctx.http,
        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true),
        ),
    )
    .await
    .map_err(|e| discord_err("failed to reply to component", e))
}
