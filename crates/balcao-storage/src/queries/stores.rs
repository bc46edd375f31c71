// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store record upsert and listing.

use balcao_core::BalcaoError;
use rusqlite::params;

use crate::database::Database;
use crate::models::StoreRecord;

/// Insert a store record, or refresh its mutable fields when the key is
/// already present. `created_at` is preserved on conflict.
pub async fn upsert_store(
    db: &Database,
    store_key: &str,
    store_name: &str,
    backend_url: &str,
    is_active: bool,
) -> Result<(), BalcaoError> {
    let store_key = store_key.to_string();
    let store_name = store_name.to_string();
    let backend_url = backend_url.to_string();
    let now = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO stores (store_key, store_name, backend_url, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                 ON CONFLICT (store_key) DO UPDATE SET
                     store_name = excluded.store_name,
                     backend_url = excluded.backend_url,
                     is_active = excluded.is_active,
                     updated_at = excluded.updated_at",
                params![store_key, store_name, backend_url, is_active, now],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List store records, optionally restricted to active ones, ordered by id.
pub async fn list_stores(db: &Database, active_only: bool) -> Result<Vec<StoreRecord>, BalcaoError> {
    db.connection()
        .call(move |conn| {
            let sql = if active_only {
                "SELECT id, store_key, store_name, backend_url, is_active, created_at, updated_at
                 FROM stores WHERE is_active = 1 ORDER BY id ASC"
            } else {
                "SELECT id, store_key, store_name, backend_url, is_active, created_at, updated_at
                 FROM stores ORDER BY id ASC"
            };
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map([], |row| {
                Ok(StoreRecord {
                    id: row.get(0)?,
                    store_key: row.get(1)?,
                    store_name: row.get(2)?,
                    backend_url: row.get(3)?,
                    is_active: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            })?;
            let mut stores = Vec::new();
            for row in rows {
                stores.push(row?);
            }
            Ok(stores)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
