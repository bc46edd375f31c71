// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API gateway for the Balcao support daemon.
//!
//! Serves the store registry, the consolidating payment search (both the
//! enveloped and the raw passthrough shape), billing aggregation, Discord
//! command management, and the bot liveness probe. Permissive CORS: the
//! dashboard and the bot call these endpoints cross-origin.

pub mod envelope;
pub mod handlers;
pub mod server;

pub use envelope::ApiResponse;
pub use server::{router, start_server, GatewayState};
