// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store backend integration for the Balcao support daemon.
//!
//! Three concerns live here:
//! - [`client::StoreClient`]: authenticated reqwest client over the
//!   configured store backends
//! - [`search`]: the consolidating payment search (fan out, first paid wins)
//! - [`stats`]: billing statistics normalization and the consolidated merge
//!
//! No caching, no retry/backoff, no circuit breaking: a failed backend
//! silently contributes zero to every aggregate for that cycle.

pub mod client;
pub mod search;
pub mod stats;

pub use client::{CheckOrder, StoreClient};
pub use search::{find_first_paid, search_all, search_store, StoreSearchResult};
pub use stats::{consolidate, consolidated_billing, normalize, Consolidated, StoreStats};
