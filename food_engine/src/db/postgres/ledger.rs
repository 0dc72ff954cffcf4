use sqlx::PgConnection;

use crate::db_types::{LedgerEntry, NewLedgerEntry};

/// Appends an entry to the wallet ledger. Ledger rows are never updated or deleted.
pub async fn insert_entry(entry: NewLedgerEntry, conn: &mut PgConnection) -> Result<LedgerEntry, sqlx::Error> {
    sqlx::query_as::<_, LedgerEntry>(
        r#"
            INSERT INTO transactions (user_id, amount, type, description, balance_before, balance_after)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, amount, type AS transaction_type, description, balance_before, balance_after,
                created_at
        "#,
    )
    .bind(entry.user_id)
    .bind(entry.amount)
    .bind(entry.transaction_type.to_string())
    .bind(entry.description)
    .bind(entry.balance_before)
    .bind(entry.balance_after)
    .fetch_one(conn)
    .await
}

pub async fn fetch_entries_for_user(
    user_id: i64,
    limit: i64,
    conn: &mut PgConnection,
) -> Result<Vec<LedgerEntry>, sqlx::Error> {
    sqlx::query_as::<_, LedgerEntry>(
        r#"
            SELECT id, user_id, amount, type AS transaction_type, description, balance_before, balance_after, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(conn)
    .await
}
