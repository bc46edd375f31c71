// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory ticket store keyed by channel id.
//!
//! No persistence; every ticket dies with the process. Mutations go through
//! typed transitions under the map's per-key lock, so two events for the
//! same channel cannot interleave mid-update.

use balcao_core::ChannelId;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::ticket::{EmailSubmission, Ticket};

/// Keyed store of open tickets.
#[derive(Debug, Default)]
pub struct TicketStore {
    tickets: DashMap<ChannelId, Ticket>,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly created ticket under its channel.
    pub fn insert(&self, channel: ChannelId, ticket: Ticket) {
        self.tickets.insert(channel, ticket);
    }

    /// Snapshot of the ticket for a channel, if any.
    pub fn get(&self, channel: ChannelId) -> Option<Ticket> {
        self.tickets.get(&channel).map(|entry| entry.value().clone())
    }

    /// Drop the ticket for a channel (cleanup sweep), returning it.
    pub fn remove(&self, channel: ChannelId) -> Option<Ticket> {
        self.tickets.remove(&channel).map(|(_, ticket)| ticket)
    }

    /// Number of open tickets.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Run the email-capture transition for a channel's ticket in place.
    ///
    /// Returns `None` when the channel has no ticket or holds a question
    /// ticket (those never capture emails).
    pub fn submit_email(
        &self,
        channel: ChannelId,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Option<EmailSubmission> {
        let mut entry = self.tickets.get_mut(&channel)?;
        match entry.value_mut() {
            Ticket::Purchase(ticket) => Some(ticket.submit_email(raw, now)),
            Ticket::Question(_) => None,
        }
    }
}
