// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Balcao support daemon.

use thiserror::Error;

/// The primary error type used across all Balcao crates.
#[derive(Debug, Error)]
pub enum BalcaoError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Discord errors (gateway connection, REST calls, channel management).
    #[error("discord error: {message}")]
    Discord {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A store backend could not be reached or answered with garbage.
    ///
    /// Never surfaced to end users as a distinct error; callers log it and
    /// treat the store as an absent contribution.
    #[error("upstream error for store `{store}`: {source}")]
    Upstream {
        store: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Gateway HTTP server errors (bind failure, serve loop).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
