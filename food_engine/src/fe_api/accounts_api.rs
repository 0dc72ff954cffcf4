//! Read-only access to a user's order history and wallet ledger.

use std::fmt::Debug;

use log::trace;

use super::{order_objects::OrderDetail, HISTORY_PAGE_SIZE};
use crate::{
    db_types::{LedgerEntry, OrderSummary},
    traits::AccountManagement,
    AccountApiError,
};

pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// The user's most recent orders, newest first, joined with the restaurant name. At most [`HISTORY_PAGE_SIZE`]
    /// orders are returned.
    pub async fn orders_for_user(&self, user_id: i64) -> Result<Vec<OrderSummary>, AccountApiError> {
        let orders = self.db.fetch_orders_for_user(user_id, HISTORY_PAGE_SIZE).await?;
        trace!("🧑️ {} orders fetched for user #{user_id}", orders.len());
        Ok(orders)
    }

    /// The user's most recent wallet ledger entries, newest first. At most [`HISTORY_PAGE_SIZE`] entries are returned.
    pub async fn transactions_for_user(&self, user_id: i64) -> Result<Vec<LedgerEntry>, AccountApiError> {
        let entries = self.db.fetch_transactions_for_user(user_id, HISTORY_PAGE_SIZE).await?;
        trace!("🧑️ {} ledger entries fetched for user #{user_id}", entries.len());
        Ok(entries)
    }

    /// Fetches an order and its line items, but only if it belongs to `user_id`. Orders belonging to other users are
    /// reported as `None`, exactly like orders that do not exist.
    pub async fn order_for_user(&self, user_id: i64, order_id: i64) -> Result<Option<OrderDetail>, AccountApiError> {
        let order = match self.db.fetch_order(order_id).await? {
            Some(order) if order.user_id == user_id => order,
            _ => return Ok(None),
        };
        let items = self.db.fetch_order_items(order.id).await?;
        Ok(Some(OrderDetail { order, items }))
    }
}
