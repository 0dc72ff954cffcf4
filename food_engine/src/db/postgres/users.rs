use log::{debug, trace};
use sqlx::PgConnection;

use crate::{
    db_types::{Money, User, UserCredentials},
    AuthApiError,
};

pub async fn insert_user(username: &str, password_hash: &str, conn: &mut PgConnection) -> Result<User, AuthApiError> {
    let result = sqlx::query_as::<_, User>(
        r#"
            INSERT INTO users (username, password_hash, balance) VALUES ($1, $2, 0)
            RETURNING id, username, balance, created_at, updated_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(conn)
    .await;
    match result {
        Ok(user) => {
            debug!("🗃️ User '{username}' created with id {}", user.id);
            Ok(user)
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AuthApiError::UsernameTaken),
        Err(e) => Err(e.into()),
    }
}

pub async fn credentials_for_username(
    username: &str,
    conn: &mut PgConnection,
) -> Result<Option<UserCredentials>, AuthApiError> {
    let creds = sqlx::query_as::<_, UserCredentials>("SELECT id, username, password_hash FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(conn)
        .await?;
    Ok(creds)
}

pub async fn user_by_id(user_id: i64, conn: &mut PgConnection) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, balance, created_at, updated_at FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(conn)
        .await
}

/// Reads the user's balance and holds a row lock on the user until the enclosing transaction ends.
pub async fn lock_balance(user_id: i64, conn: &mut PgConnection) -> Result<Option<Money>, sqlx::Error> {
    let balance = sqlx::query_scalar::<_, Money>("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(conn)
        .await?;
    trace!("🗃️ Row lock acquired for user #{user_id}");
    Ok(balance)
}

pub async fn update_balance(user_id: i64, balance: Money, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET balance = $1, updated_at = now() WHERE id = $2")
        .bind(balance)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}
