// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slash command registration and clearing against the Discord REST API.
//!
//! With `discord.guild_id` set, commands are scoped to that guild (instant
//! propagation, used in development); otherwise they are registered
//! globally.

use balcao_config::model::DiscordConfig;
use balcao_core::BalcaoError;
use serde::Serialize;
use serenity::all::{ApplicationId, Command, CreateCommand, GuildId};
use serenity::http::Http;
use tracing::info;

use crate::actions::SlashCommand;

const COMMANDS: &[(SlashCommand, &str)] = &[
    (SlashCommand::Suporte, "Abre o sistema de suporte com opções de ticket"),
    (
        SlashCommand::Setup,
        "Configura o sistema de suporte no canal atual (apenas administradores)",
    ),
    (
        SlashCommand::Cleanup,
        "Remove todos os canais de ticket existentes (apenas administradores)",
    ),
    (SlashCommand::Status, "Mostra o status atual do bot"),
    (SlashCommand::Ping, "Verifica a latência do bot"),
    (SlashCommand::Dashboard, "Fornece o link para o dashboard administrativo"),
];

/// A command name/description pair, as listed by the management endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// The commands this bot registers, for listing without hitting Discord.
pub fn command_catalog() -> Vec<CommandSpec> {
    COMMANDS
        .iter()
        .map(|(command, description)| CommandSpec {
            name: command.as_ref(),
            description: *description,
        })
        .collect()
}

fn command_definitions() -> Vec<CreateCommand> {
    COMMANDS
        .iter()
        .map(|(command, description)| {
            CreateCommand::new(command.as_ref()).description(*description)
        })
        .collect()
}

fn rest_client(config: &DiscordConfig) -> Result<Http, BalcaoError> {
    let token = config
        .token
        .as_deref()
        .ok_or_else(|| BalcaoError::Config("discord.token is required to manage commands".into()))?;
    let client_id = config.client_id.ok_or_else(|| {
        BalcaoError::Config("discord.client_id is required to manage commands".into())
    })?;

    let http = Http::new(token);
    http.set_application_id(ApplicationId::new(client_id));
    Ok(http)
}

/// Register all slash commands. Returns how many were registered.
pub async fn register_commands(config: &DiscordConfig) -> Result<usize, BalcaoError> {
    let http = rest_client(config)?;
    let definitions = command_definitions();

    let registered = match config.guild_id {
        Some(guild_id) => GuildId::new(guild_id)
            .set_commands(&http, definitions)
            .await
            .map_err(|e| BalcaoError::Discord {
                message: format!("failed to register guild commands for {guild_id}"),
                source: Some(Box::new(e)),
            })?,
        None => Command::set_global_commands(&http, definitions)
            .await
            .map_err(|e| BalcaoError::Discord {
                message: "failed to register global commands".into(),
                source: Some(Box::new(e)),
            })?,
    };

    info!(
        count = registered.len(),
        scope = config.guild_id.map(|_| "guild").unwrap_or("global"),
        "slash commands registered"
    );
    Ok(registered.len())
}

/// Remove every registered slash command.
pub async fn clear_commands(config: &DiscordConfig) -> Result<(), BalcaoError> {
    let http = rest_client(config)?;

    match config.guild_id {
        Some(guild_id) => {
            GuildId::new(guild_id)
                .set_commands(&http, Vec::new())
                .await
                .map_err(|e| BalcaoError::Discord {
                    message: format!("failed to clear guild commands for {guild_id}"),
                    source: Some(Box::new(e)),
                })?;
        }
        None => {
            Command::set_global_commands(&http, Vec::new())
                .await
                .map_err(|e| BalcaoError::Discord {
                    message: "failed to clear global commands".into(),
                    source: Some(Box::new(e)),
                })?;
        }
    }

    info!(
        scope = config.guild_id.map(|_| "guild").unwrap_or("global"),
        "slash commands cleared"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_all_six_commands() {
        let catalog = command_catalog();
        assert_eq!(catalog.len(), 6);
        let names: Vec<&str> = catalog.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["suporte", "setup", "cleanup", "status", "ping", "dashboard"]);
    }

    #[test]
    fn rest_client_requires_token_and_client_id() {
        let mut config = DiscordConfig::default();
        assert!(matches!(rest_client(&config), Err(BalcaoError::Config(_))));

        config.token = Some("tok".into());
        assert!(matches!(rest_client(&config), Err(BalcaoError::Config(_))));

        config.client_id = Some(42);
        assert!(rest_client(&config).is_ok());
    }
}
