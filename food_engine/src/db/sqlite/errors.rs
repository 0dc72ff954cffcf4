use thiserror::Error;

use crate::{AccountApiError, AuthApiError, CatalogApiError, OrderFlowError};

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Database migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl From<SqliteDatabaseError> for AuthApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        AuthApiError::DatabaseError(e.to_string())
    }
}

impl From<SqliteDatabaseError> for AccountApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}

impl From<SqliteDatabaseError> for CatalogApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}

impl From<SqliteDatabaseError> for OrderFlowError {
    fn from(e: SqliteDatabaseError) -> Self {
        OrderFlowError::DatabaseError(e.to_string())
    }
}
