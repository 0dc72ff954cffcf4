use thiserror::Error;

use crate::{AccountApiError, AuthApiError, CatalogApiError, OrderFlowError};

#[derive(Debug, Error)]
pub enum PostgresDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Database migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl From<PostgresDatabaseError> for AuthApiError {
    fn from(e: PostgresDatabaseError) -> Self {
        AuthApiError::DatabaseError(e.to_string())
    }
}

impl From<PostgresDatabaseError> for AccountApiError {
    fn from(e: PostgresDatabaseError) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}

impl From<PostgresDatabaseError> for CatalogApiError {
    fn from(e: PostgresDatabaseError) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}

impl From<PostgresDatabaseError> for OrderFlowError {
    fn from(e: PostgresDatabaseError) -> Self {
        OrderFlowError::DatabaseError(e.to_string())
    }
}
