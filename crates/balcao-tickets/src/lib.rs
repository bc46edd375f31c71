// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support ticket state machine for the Balcao daemon.
//!
//! The lifecycle: channel creation → email capture → payment lookup →
//! fee-payment prompt → resolution. This crate owns the states and
//! transitions; the Discord crate renders outcomes and the stores crate
//! answers lookups. Nothing here persists: tickets live and die with the
//! process.

pub mod email;
pub mod flow;
pub mod store;
pub mod ticket;

pub use email::is_valid_email;
pub use flow::{handle_ticket_message, MessageOutcome};
pub use store::TicketStore;
pub use ticket::{
    channel_name, is_ticket_channel, EmailState, EmailSubmission, PurchaseTicket, QuestionTicket,
    Ticket, TicketKind, CHANNEL_PREFIX,
};
