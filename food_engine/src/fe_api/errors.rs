use thiserror::Error;

use crate::db_types::Money;

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("User #{0} does not exist")]
    UserNotFound(i64),
    #[error("Could not hash password: {0}")]
    HashingError(String),
}

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    InvalidOrder(String),
    #[error("Menu item {0} not found")]
    ItemNotFound(i64),
    #[error("Menu item {0} is not available")]
    ItemUnavailable(String),
    #[error("Insufficient balance")]
    InsufficientBalance { balance: Money, required: Money, shortfall: Money },
    #[error("Invalid amount. Must be greater than 0")]
    InvalidAmount(Money),
    #[error("User account #{0} does not exist")]
    AccountNotFound(i64),
}

impl OrderFlowError {
    /// True when the error was caused by the request rather than the store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::DatabaseError(_))
    }
}

macro_rules! driver_error {
    ($($err:ty),+) => {
        $(
            impl From<sqlx::Error> for $err {
                fn from(e: sqlx::Error) -> Self {
                    Self::DatabaseError(e.to_string())
                }
            }
        )+
    };
}

driver_error!(AuthApiError, AccountApiError, CatalogApiError, OrderFlowError);
