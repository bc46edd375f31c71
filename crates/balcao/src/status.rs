// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `balcao status` command implementation.
//!
//! Connects to the gateway's bot liveness endpoint to display connection
//! state and open ticket count. Falls back gracefully when the daemon is
//! not running.

use std::io::IsTerminal;
use std::time::Duration;

use balcao_config::model::BalcaoConfig;
use balcao_core::{BalcaoError, BotStatus};
use serde::{Deserialize, Serialize};

/// Liveness endpoint response from the gateway.
#[derive(Debug, Deserialize)]
struct LivenessResponse {
    status: BotStatus,
    #[serde(default)]
    tickets: usize,
}

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub running: bool,
    pub bot_status: Option<BotStatus>,
    pub tickets: Option<usize>,
    pub gateway_host: String,
    pub gateway_port: u16,
}

/// Run the `balcao status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_status(
    config: &BalcaoConfig,
    json: bool,
    plain: bool,
) -> Result<(), BalcaoError> {
    let host = &config.gateway.host;
    let port = config.gateway.port;
    let url = format!("{}/discord/bot", config.gateway.base_url());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
        .map_err(|e| BalcaoError::Internal(format!("failed to create HTTP client: {e}")))?;

    let result = client.get(&url).send().await;

    match result {
        Ok(resp) if resp.status().is_success() => {
            let liveness: LivenessResponse = resp.json().await.map_err(|e| {
                BalcaoError::Internal(format!("failed to parse liveness response: {e}"))
            })?;

            if json {
                let status_resp = StatusResponse {
                    running: true,
                    bot_status: Some(liveness.status),
                    tickets: Some(liveness.tickets),
                    gateway_host: host.clone(),
                    gateway_port: port,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&status_resp)
                        .unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                let use_color = !plain && std::io::stdout().is_terminal();
                print_status_running(liveness.status, liveness.tickets, use_color);
            }
        }
        _ => {
            if json {
                let status_resp = StatusResponse {
                    running: false,
                    bot_status: None,
                    tickets: None,
                    gateway_host: host.clone(),
                    gateway_port: port,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&status_resp)
                        .unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                let use_color = !plain && std::io::stdout().is_terminal();
                print_status_offline(host, port, use_color);
            }
        }
    }

    Ok(())
}

/// Print running status with optional colors.
fn print_status_running(status: BotStatus, tickets: usize, use_color: bool) {
    println!();
    println!("  balcao status");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        let label = match status {
            BotStatus::Online => format!("{}", "online".green()),
            BotStatus::Connecting => format!("{}", "connecting".yellow()),
            BotStatus::Offline => format!("{}", "offline".red()),
        };
        println!("    Bot:      {} {label}", "✓".green());
    } else {
        println!("    Bot:      [OK] {status}");
    }

    println!("    Tickets:  {tickets}");
    println!();
}

/// Print offline status with optional colors.
fn print_status_offline(host: &str, port: u16, use_color: bool) {
    println!();
    println!("  balcao status");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        println!("    State:    {} {}", "✗".red(), "not running".red());
    } else {
        println!("    State:    [FAIL] not running");
    }

    println!("    Endpoint: http://{host}:{port}/discord/bot");
    println!();
    println!("  Start with: balcao serve");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_serializes_running() {
        let resp = StatusResponse {
            running: true,
            bot_status: Some(BotStatus::Online),
            tickets: Some(3),
            gateway_host: "127.0.0.1".to_string(),
            gateway_port: 3000,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"running\":true"));
        assert!(json.contains("\"bot_status\":\"online\""));
        assert!(json.contains("\"tickets\":3"));
    }

    #[test]
    fn status_response_serializes_offline() {
        let resp = StatusResponse {
            running: false,
            bot_status: None,
            tickets: None,
            gateway_host: "127.0.0.1".to_string(),
            gateway_port: 3000,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"running\":false"));
    }

    #[test]
    fn liveness_response_parses_gateway_shape() {
        let json = r#"{"success":true,"message":"Bot Discord está rodando","status":"online","tickets":2}"#;
        let parsed: LivenessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, BotStatus::Online);
        assert_eq!(parsed.tickets, 2);
    }
}
