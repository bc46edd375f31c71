// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the passive record tables.

use serde::{Deserialize, Serialize};

/// A persisted store record, synced from configuration at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: i64,
    pub store_key: String,
    pub store_name: String,
    pub backend_url: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A payment located by the consolidating search, recorded for audit.
///
/// Never read back into the ticket flow; the flow always queries the store
/// backends directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: i64,
    pub external_id: String,
    pub store_key: String,
    pub amount: f64,
    pub status: String,
    pub customer_email: String,
    pub created_at: String,
    pub recorded_at: String,
}
