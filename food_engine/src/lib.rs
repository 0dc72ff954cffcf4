//! Food Ordering Engine
//!
//! The engine contains the business logic of the food ordering service: user accounts, the restaurant catalog, order
//! placement and the wallet ledger. It knows nothing about HTTP.
//!
//! The library is divided into two main sections:
//! 1. Database management and control (`db`). SQLite (the default) and Postgres are the two supported backends. You
//!    should never need to access the database directly. Instead, use the public API provided by the engine. The
//!    exception is the data types used in the database. These are defined in the [`mod@db_types`] module and are public.
//! 2. The engine public API ([`mod@fe_api`]). Each API wraps a backend that implements the traits in [`traits`].
//!
//! All money moves through [`OrderFlowApi`]. Placing an order and topping up a wallet are each a single atomic store
//! transaction that locks the user's balance, writes the change, and appends a ledger entry.
mod db;

pub mod db_types;
mod fe_api;
pub mod helpers;

#[cfg(feature = "sqlite")]
pub mod test_utils;

pub mod traits {
    pub use crate::db::traits::{AccountManagement, AuthManagement, CatalogManagement, OrderFlowDatabase};
}

#[cfg(feature = "postgres")]
pub use db::postgres::{PostgresDatabase, PostgresDatabaseError};
#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use db::traits::{AccountManagement, AuthManagement, CatalogManagement, OrderFlowDatabase};
pub use fe_api::{
    accounts_api::AccountApi,
    auth_api::AuthApi,
    catalog_api::CatalogApi,
    errors::{AccountApiError, AuthApiError, CatalogApiError, OrderFlowError},
    order_flow_api::OrderFlowApi,
    order_objects,
    HISTORY_PAGE_SIZE,
};
