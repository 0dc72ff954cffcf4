//! Postgres backend. Unlike SQLite, Postgres locks individual user rows, so orders and top-ups for different users
//! never wait on each other.
mod db;
mod errors;

pub mod catalog;
pub mod ledger;
pub mod orders;
pub mod users;

pub use db::PostgresDatabase;
pub use errors::PostgresDatabaseError;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn new_pool(url: &str, max_connections: u32) -> Result<PgPool, PostgresDatabaseError> {
    let pool = PgPoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
