// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Balcao support daemon.
//!
//! This crate provides the shared error type, common identifier and payment
//! types, and the [`PaymentLookup`] trait that separates the ticket state
//! machine from the store fan-out.

pub mod error;
pub mod lookup;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BalcaoError;
pub use lookup::PaymentLookup;
pub use types::{BotStatus, ChannelId, Order, PaymentMatch, UserId};
