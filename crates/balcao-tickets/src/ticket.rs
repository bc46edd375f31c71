// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket types and the email-capture transition.
//!
//! Tickets are tagged by kind so illegal states stay unrepresentable: a
//! question ticket has no email field at all, and a purchase ticket's email
//! is either awaiting or captured-with-timestamp, never half of each.

use balcao_core::UserId;
use chrono::{DateTime, Utc};
use strum::{Display, EnumString};

use crate::email::is_valid_email;

/// Channel name prefix shared by all ticket channels; the cleanup sweep
/// matches on it.
pub const CHANNEL_PREFIX: &str = "ticket-";

/// The two kinds of support ticket a user can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TicketKind {
    /// Customer already paid and needs their order located.
    PurchaseMade,
    /// Pre-purchase question or problem.
    NoPurchase,
}

impl TicketKind {
    /// Short slug used inside channel names.
    pub fn slug(self) -> &'static str {
        match self {
            TicketKind::PurchaseMade => "compra",
            TicketKind::NoPurchase => "duvidas",
        }
    }
}

/// The conventional channel name for a user's ticket of a given kind.
///
/// One open ticket per (user, kind) is enforced by looking this name up
/// before creating the channel. Best-effort, not transactional.
pub fn channel_name(kind: TicketKind, username: &str, discriminator: &str) -> String {
    format!(
        "{CHANNEL_PREFIX}{}-{}-{}",
        kind.slug(),
        username.to_lowercase(),
        discriminator
    )
}

/// Whether a channel name follows the ticket naming convention.
pub fn is_ticket_channel(name: &str) -> bool {
    name.starts_with(CHANNEL_PREFIX)
}

/// Email progress of a purchase ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailState {
    /// Waiting for the customer to send their purchase email.
    Awaiting,
    /// Email captured; lookups already ran and must not run again.
    Captured {
        email: String,
        captured_at: DateTime<Utc>,
    },
}

/// Outcome of feeding a channel message to a purchase ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSubmission {
    /// Message does not look like an email; ticket stays awaiting.
    Invalid,
    /// Email captured just now; caller should run the payment lookup.
    Captured(String),
    /// An email was captured earlier; nothing to do.
    AlreadyCaptured,
}

/// A ticket for a customer who already made a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseTicket {
    pub user_id: UserId,
    pub opened_at: DateTime<Utc>,
    pub email: EmailState,
}

impl PurchaseTicket {
    pub fn new(user_id: UserId, opened_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            opened_at,
            email: EmailState::Awaiting,
        }
    }

    /// Feed one channel message to the ticket.
    ///
    /// The message is trimmed before matching; a valid email transitions the
    /// ticket to `Captured` exactly once.
    pub fn submit_email(&mut self, raw: &str, now: DateTime<Utc>) -> EmailSubmission {
        if matches!(self.email, EmailState::Captured { .. }) {
            return EmailSubmission::AlreadyCaptured;
        }

        let candidate = raw.trim();
        if !is_valid_email(candidate) {
            return EmailSubmission::Invalid;
        }

        self.email = EmailState::Captured {
            email: candidate.to_string(),
            captured_at: now,
        };
        EmailSubmission::Captured(candidate.to_string())
    }
}

/// A ticket for a pre-purchase question. All branches from here are
/// menu-button acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTicket {
    pub user_id: UserId,
    pub opened_at: DateTime<Utc>,
}

impl QuestionTicket {
    pub fn new(user_id: UserId, opened_at: DateTime<Utc>) -> Self {
        Self { user_id, opened_at }
    }
}

/// A support ticket bound to one Discord channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ticket {
    Purchase(PurchaseTicket),
    Question(QuestionTicket),
}

impl Ticket {
    /// Create a fresh ticket of the given kind.
    pub fn open(kind: TicketKind, user_id: UserId, opened_at: DateTime<Utc>) -> Self {
        match kind {
            TicketKind::PurchaseMade => Ticket::Purchase(PurchaseTicket::new(user_id, opened_at)),
            TicketKind::NoPurchase => Ticket::Question(QuestionTicket::new(user_id, opened_at)),
        }
    }

    pub fn kind(&self) -> TicketKind {
        match self {
            Ticket::Purchase(_) => TicketKind::PurchaseMade,
            Ticket::Question(_) => TicketKind::NoPurchase,
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            Ticket::Purchase(t) => t.user_id,
            Ticket::Question(t) => t.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-02-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn channel_name_follows_convention() {
        assert_eq!(
            channel_name(TicketKind::PurchaseMade, "Fulano", "1234"),
            "ticket-compra-fulano-1234"
        );
        assert_eq!(
            channel_name(TicketKind::NoPurchase, "fulano", "0"),
            "ticket-duvidas-fulano-0"
        );
        assert!(is_ticket_channel("ticket-compra-fulano-1234"));
        assert!(!is_ticket_channel("geral"));
    }

    #[test]
    fn invalid_email_keeps_ticket_awaiting() {
        let mut ticket = PurchaseTicket::new(UserId(1), now());
        assert_eq!(ticket.submit_email("oi, comprei ontem", now()), EmailSubmission::Invalid);
        assert_eq!(ticket.email, EmailState::Awaiting);
    }

    #[test]
    fn valid_email_is_captured_with_timestamp() {
        let mut ticket = PurchaseTicket::new(UserId(1), now());
        let outcome = ticket.submit_email("  cliente@gmail.com  ", now());
        assert_eq!(outcome, EmailSubmission::Captured("cliente@gmail.com".into()));
        match &ticket.email {
            EmailState::Captured { email, captured_at } => {
                assert_eq!(email, "cliente@gmail.com");
                assert_eq!(*captured_at, now());
            }
            EmailState::Awaiting => panic!("email should be captured"),
        }
    }

    #[test]
    fn second_submission_is_already_captured() {
        let mut ticket = PurchaseTicket::new(UserId(1), now());
        ticket.submit_email("cliente@gmail.com", now());
        assert_eq!(
            ticket.submit_email("outro@gmail.com", now()),
            EmailSubmission::AlreadyCaptured
        );
        // The first email stays.
        match &ticket.email {
            EmailState::Captured { email, .. } => assert_eq!(email, "cliente@gmail.com"),
            EmailState::Awaiting => panic!("email should be captured"),
        }
    }

    #[test]
    fn open_builds_the_right_variant() {
        let purchase = Ticket::open(TicketKind::PurchaseMade, UserId(9), now());
        assert_eq!(purchase.kind(), TicketKind::PurchaseMade);
        assert_eq!(purchase.user_id(), UserId(9));

        let question = Ticket::open(TicketKind::NoPurchase, UserId(9), now());
        assert_eq!(question.kind(), TicketKind::NoPurchase);
    }
}
