//! # Food engine public API
//!
//! The `fe_api` module exposes the programmatic API for the food ordering engine. The API is modular, so that clients
//! can pick and choose the functionality they need.
//!
//! * [`auth_api`] handles registration, login and re-reading users for token verification.
//! * [`accounts_api`] provides the read-only order history and wallet ledger for a user.
//! * [`catalog_api`] lists restaurants and their menus.
//! * [`order_flow_api`] places orders and tops up wallets. These are the only operations that move money.
//!
//! # API usage
//!
//! An API instance is created by supplying a database backend that implements the backend traits the API needs:
//!
//! ```rust,ignore
//! use food_engine::{OrderFlowApi, SqliteDatabase, db_types::Money};
//! let db = SqliteDatabase::new_with_url("sqlite://data/food_store.db", 25).await?;
//! // SqliteDatabase implements OrderFlowDatabase
//! let api = OrderFlowApi::new(db);
//! let new_balance = api.top_up(user_id, Money::from(20_000)).await?;
//! ```

/// The maximum number of records returned by the order and transaction history queries.
pub const HISTORY_PAGE_SIZE: i64 = 50;

pub mod accounts_api;
pub mod auth_api;
pub mod catalog_api;
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
