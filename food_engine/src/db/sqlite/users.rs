use log::{debug, trace};
use sqlx::SqliteConnection;

use super::single_row;
use crate::{
    db_types::{Money, User, UserCredentials},
    AuthApiError,
};

/// Inserts a new user with a zero balance. A clash on the unique username index is reported as
/// [`AuthApiError::UsernameTaken`].
pub async fn insert_user(
    username: &str,
    password_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<User, AuthApiError> {
    let result = sqlx::query_as::<_, User>(
        r#"
            INSERT INTO users (username, password_hash, balance) VALUES (?, ?, 0)
            RETURNING id, username, balance, created_at, updated_at;
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_all(conn)
    .await
    .and_then(single_row);
    match result {
        Ok(user) => {
            debug!("🗃️ User '{username}' created with id {}", user.id);
            Ok(user)
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AuthApiError::UsernameTaken),
        Err(e) => Err(e.into()),
    }
}

pub async fn user_exists(username: &str, conn: &mut SqliteConnection) -> Result<bool, AuthApiError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

pub async fn credentials_for_username(
    username: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<UserCredentials>, AuthApiError> {
    let creds = sqlx::query_as::<_, UserCredentials>("SELECT id, username, password_hash FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(conn)
        .await?;
    Ok(creds)
}

pub async fn user_by_id(user_id: i64, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, balance, created_at, updated_at FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(conn)
        .await
}

/// Takes SQLite's writer lock on behalf of the open transaction and returns the user's current balance.
///
/// SQLite has no row locks. A no-op write on the user row is the first statement of the transaction, so the lock is
/// acquired before anything is read and concurrent writers queue on the busy handler. If the user does not exist,
/// `None` is returned.
pub async fn lock_balance(user_id: i64, conn: &mut SqliteConnection) -> Result<Option<Money>, sqlx::Error> {
    let balance = sqlx::query_scalar::<_, Money>(
        "UPDATE users SET updated_at = updated_at WHERE id = ? RETURNING balance",
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?
    .into_iter()
    .next();
    trace!("🗃️ Balance lock acquired for user #{user_id}");
    Ok(balance)
}

pub async fn update_balance(user_id: i64, balance: Money, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET balance = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(balance)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}
