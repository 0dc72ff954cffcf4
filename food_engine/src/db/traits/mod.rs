//! The contracts a storage backend must fulfil to act as the store for the food ordering engine.
//!
//! * [`OrderFlowDatabase`] owns every balance mutation. Each method is a single atomic unit: it either commits all of
//!   its writes or none of them.
//! * [`AuthManagement`] stores and retrieves user credentials.
//! * [`AccountManagement`] provides read-only views of a user's orders and wallet ledger.
//! * [`CatalogManagement`] provides read-only access to restaurants and their menus.
mod account_management;
mod auth_management;
mod catalog_management;
mod order_flow_database;

pub use account_management::AccountManagement;
pub use auth_management::AuthManagement;
pub use catalog_management::CatalogManagement;
pub use order_flow_database::OrderFlowDatabase;
