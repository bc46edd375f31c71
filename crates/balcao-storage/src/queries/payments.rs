// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment audit records.

use balcao_core::BalcaoError;
use rusqlite::params;

use crate::database::Database;
use crate::models::PaymentRecord;

/// Append a found payment to the audit table.
pub async fn record_payment(
    db: &Database,
    external_id: &str,
    store_key: &str,
    amount: f64,
    status: &str,
    customer_email: &str,
    created_at: &str,
) -> Result<(), BalcaoError> {
    let external_id = external_id.to_string();
    let store_key = store_key.to_string();
    let status = status.to_string();
    let customer_email = customer_email.to_string();
    let created_at = created_at.to_string();
    let recorded_at = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO payments (external_id, store_key, amount, status, customer_email, created_at, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    external_id,
                    store_key,
                    amount,
                    status,
                    customer_email,
                    created_at,
                    recorded_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The most recently recorded payments, newest first.
pub async fn recent_payments(db: &Database, limit: u32) -> Result<Vec<PaymentRecord>, BalcaoError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, store_key, amount, status, customer_email, created_at, recorded_at
                 FROM payments ORDER BY recorded_at DESC, id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(PaymentRecord {
                    id: row.get(0)?,
                    external_id: row.get(1)?,
                    store_key: row.get(2)?,
                    amount: row.get(3)?,
                    status: row.get(4)?,
                    customer_email: row.get(5)?,
                    created_at: row.get(6)?,
                    recorded_at: row.get(7)?,
                })
            })?;
            let mut payments = Vec::new();
            for row in rows {
                payments.push(row?);
            }
            Ok(payments)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
