// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The message-driven half of the ticket flow: email capture followed by
//! payment lookup.
//!
//! This module owns the decision, not the replies: callers map the returned
//! [`MessageOutcome`] to whatever their chat platform renders.

use balcao_core::{ChannelId, PaymentLookup, PaymentMatch};
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::store::TicketStore;
use crate::ticket::EmailSubmission;

/// What a channel message did to the ticket in that channel.
#[derive(Debug)]
pub enum MessageOutcome {
    /// No open purchase ticket awaiting an email; nothing happened.
    Ignored,
    /// Message did not look like an email; ticket still awaiting.
    InvalidEmail,
    /// Email captured and a paid order was found.
    PaymentFound(PaymentMatch),
    /// Email captured but no store reported a paid order. Lookup transport
    /// errors also land here after logging.
    PaymentNotFound { email: String },
}

/// Feed one non-bot channel message through the state machine.
///
/// The email transition and the lookup are deliberately decoupled: capture
/// happens first and exactly once, so a lookup failure never re-arms the
/// ticket.
pub async fn handle_ticket_message(
    tickets: &TicketStore,
    lookup: &dyn PaymentLookup,
    channel: ChannelId,
    content: &str,
    now: DateTime<Utc>,
) -> MessageOutcome {
    let email = match tickets.submit_email(channel, content, now) {
        None | Some(EmailSubmission::AlreadyCaptured) => return MessageOutcome::Ignored,
        Some(EmailSubmission::Invalid) => return MessageOutcome::InvalidEmail,
        Some(EmailSubmission::Captured(email)) => email,
    };

    info!(channel = %channel, "email captured, searching stores");

    match lookup.find_paid_order(&email).await {
        Ok(Some(found)) => {
            info!(
                channel = %channel,
                store = found.store.as_str(),
                "paid order located"
            );
            MessageOutcome::PaymentFound(found)
        }
        Ok(None) => MessageOutcome::PaymentNotFound { email },
        Err(e) => {
            error!(channel = %channel, error = %e, "payment lookup failed");
            MessageOutcome::PaymentNotFound { email }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::{Ticket, TicketKind};
    use async_trait::async_trait;
    use balcao_core::{BalcaoError, Order, UserId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn now() -> DateTime<Utc> {
        "2026-02-01T10:00:00Z".parse().unwrap()
    }

    fn paid_match() -> PaymentMatch {
        PaymentMatch {
            order: Order {
                id: serde_json::json!(55),
                amount: 34.9,
                status: "paid".into(),
                customer_email: "cliente@gmail.com".into(),
                created_at: "2026-01-30T08:00:00Z".into(),
            },
            store: "lojabux".into(),
            store_name: "RecargaBX".into(),
        }
    }

    /// Canned lookup that counts how often it runs.
    struct StubLookup {
        result: Option<PaymentMatch>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubLookup {
        fn found() -> Self {
            Self { result: Some(paid_match()), fail: false, calls: AtomicUsize::new(0) }
        }

        fn empty() -> Self {
            Self { result: None, fail: false, calls: AtomicUsize::new(0) }
        }

        fn failing() -> Self {
            Self { result: None, fail: true, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentLookup for StubLookup {
        async fn find_paid_order(
            &self,
            _email: &str,
        ) -> Result<Option<PaymentMatch>, BalcaoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(BalcaoError::Internal("boom".into()));
            }
            Ok(self.result.clone())
        }
    }

    fn store_with_purchase_ticket(channel: ChannelId) -> TicketStore {
        let store = TicketStore::new();
        store.insert(channel, Ticket::open(TicketKind::PurchaseMade, UserId(1), now()));
        store
    }

    #[tokio::test]
    async fn message_without_ticket_is_ignored() {
        let tickets = TicketStore::new();
        let lookup = StubLookup::found();
        let outcome =
            handle_ticket_message(&tickets, &lookup, ChannelId(1), "cliente@gmail.com", now())
                .await;
        assert!(matches!(outcome, MessageOutcome::Ignored));
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_lookup() {
        let channel = ChannelId(10);
        let tickets = store_with_purchase_ticket(channel);
        let lookup = StubLookup::found();

        let outcome =
            handle_ticket_message(&tickets, &lookup, channel, "sem email aqui", now()).await;
        assert!(matches!(outcome, MessageOutcome::InvalidEmail));
        assert_eq!(lookup.calls(), 0);

        // Still awaiting: a later valid email goes through.
        let outcome =
            handle_ticket_message(&tickets, &lookup, channel, "cliente@gmail.com", now()).await;
        assert!(matches!(outcome, MessageOutcome::PaymentFound(_)));
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn second_message_does_not_retrigger_lookup() {
        let channel = ChannelId(10);
        let tickets = store_with_purchase_ticket(channel);
        let lookup = StubLookup::found();

        handle_ticket_message(&tickets, &lookup, channel, "cliente@gmail.com", now()).await;
        let outcome =
            handle_ticket_message(&tickets, &lookup, channel, "outro@gmail.com", now()).await;

        assert!(matches!(outcome, MessageOutcome::Ignored));
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn no_paid_order_reports_not_found_with_email() {
        let channel = ChannelId(10);
        let tickets = store_with_purchase_ticket(channel);
        let lookup = StubLookup::empty();

        let outcome =
            handle_ticket_message(&tickets, &lookup, channel, "cliente@gmail.com", now()).await;
        match outcome {
            MessageOutcome::PaymentNotFound { email } => assert_eq!(email, "cliente@gmail.com"),
            other => panic!("expected PaymentNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lookup_error_is_treated_as_not_found_without_rearming() {
        let channel = ChannelId(10);
        let tickets = store_with_purchase_ticket(channel);
        let lookup = StubLookup::failing();

        let outcome =
            handle_ticket_message(&tickets, &lookup, channel, "cliente@gmail.com", now()).await;
        assert!(matches!(outcome, MessageOutcome::PaymentNotFound { .. }));

        // The email stayed captured: no second lookup on a retry message.
        let outcome =
            handle_ticket_message(&tickets, &lookup, channel, "cliente@gmail.com", now()).await;
        assert!(matches!(outcome, MessageOutcome::Ignored));
        assert_eq!(lookup.calls(), 1);
    }
}
