use crate::{
    db_types::{LedgerEntry, Money, NewOrder},
    order_objects::OrderReceipt,
    OrderFlowError,
};

/// This trait defines the highest level of behaviour for backends supporting the food ordering engine: every change
/// to a user's balance goes through here.
///
/// Implementations must hold an exclusive lock on the purchaser's balance from the moment it is read until the unit
/// commits or rolls back, so that concurrent calls for the same user serialise. Every balance change writes exactly one
/// ledger entry inside the same unit.
#[allow(async_fn_in_trait)]
pub trait OrderFlowDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Takes a validated new order, and in a single atomic transaction,
    /// * looks up every requested menu item for the order's restaurant, rejecting the whole order if any item is
    ///   missing or unavailable,
    /// * prices each line and sums the order total,
    /// * locks and reads the purchaser's balance, rejecting the order if the total exceeds it,
    /// * inserts the order (status `pending`) and its line items,
    /// * debits the balance and appends a `payment` ledger entry.
    ///
    /// No rows are written if any step fails.
    async fn process_new_order(&self, user_id: i64, order: NewOrder) -> Result<OrderReceipt, OrderFlowError>;

    /// Credits `amount` to the user's balance and appends a `topup` ledger entry, atomically.
    ///
    /// The amount must already have been checked to be positive.
    async fn process_top_up(&self, user_id: i64, amount: Money) -> Result<LedgerEntry, OrderFlowError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), OrderFlowError> {
        Ok(())
    }
}
