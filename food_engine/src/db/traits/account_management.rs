use crate::{
    db_types::{LedgerEntry, Order, OrderItem, OrderSummary},
    AccountApiError,
};

/// Read-only queries over a user's order history and wallet ledger.
///
/// All list queries return the newest records first (ordered by `created_at`, then `id`) and never more than `limit`
/// records.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    async fn fetch_orders_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<OrderSummary>, AccountApiError>;

    async fn fetch_transactions_for_user(&self, user_id: i64, limit: i64)
        -> Result<Vec<LedgerEntry>, AccountApiError>;

    /// Fetches a single order by its id. If the order does not exist, `None` is returned.
    async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, AccountApiError>;

    /// Fetches the line items of an order, in the order they were written.
    async fn fetch_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>, AccountApiError>;
}
