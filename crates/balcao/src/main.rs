// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Balcao - multi-store support bot and billing aggregation daemon.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;
mod status;

use clap::{Parser, Subcommand};

/// Balcao - multi-store support bot and billing aggregation daemon.
#[derive(Parser, Debug)]
#[command(name = "balcao", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the daemon: HTTP gateway plus Discord bot.
    Serve,
    /// Show daemon status via the gateway liveness endpoint.
    Status {
        /// Emit structured JSON for scripting.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Manage Discord slash commands.
    Commands {
        #[command(subcommand)]
        action: CommandsAction,
    },
}

/// Slash command management actions.
#[derive(Subcommand, Debug)]
enum CommandsAction {
    /// Register all slash commands (guild-scoped when discord.guild_id is set).
    Register,
    /// Remove every registered slash command.
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match balcao_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            balcao_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) | None => serve::run_serve(config).await,
        Some(Commands::Status { json, plain }) => status::run_status(&config, json, plain).await,
        Some(Commands::Commands { action }) => match action {
            CommandsAction::Register => {
                match balcao_discord::commands::register_commands(&config.discord).await {
                    Ok(count) => {
                        println!("{count} comandos registrados");
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            CommandsAction::Clear => {
                match balcao_discord::commands::clear_commands(&config.discord).await {
                    Ok(()) => {
                        println!("comandos removidos");
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }
}
