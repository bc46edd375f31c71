// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment lookup trait: the seam between the ticket flow and the
//! consolidating search.
//!
//! The production implementation issues an HTTP request to the gateway's
//! search endpoint, which fans out to every store backend. Tests substitute
//! a canned implementation so the state machine can be exercised without a
//! network.

use async_trait::async_trait;

use crate::error::BalcaoError;
use crate::types::PaymentMatch;

/// Looks up a paid order by customer email across all configured stores.
#[async_trait]
pub trait PaymentLookup: Send + Sync {
    /// Returns the first paid order matching `email`, or `None` when no
    /// store reports a paid order.
    ///
    /// Transport failures are the implementation's problem: the ticket flow
    /// treats any error as "not found" after logging it.
    async fn find_paid_order(&self, email: &str) -> Result<Option<PaymentMatch>, BalcaoError>;
}
