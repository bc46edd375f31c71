// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Balcao support daemon.
//!
//! A passive record: store configuration is synced in at startup and found
//! payments are appended for audit. Nothing in the ticket flow reads from
//! here. WAL-mode SQLite with embedded migrations and a single-writer
//! concurrency model via `tokio-rusqlite`.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use models::{PaymentRecord, StoreRecord};
