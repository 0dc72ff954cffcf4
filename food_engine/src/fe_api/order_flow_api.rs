use std::fmt::Debug;

use log::*;

use super::order_objects::OrderReceipt;
use crate::{
    db_types::{LedgerEntry, Money, NewOrder, NewOrderItem},
    traits::OrderFlowDatabase,
    OrderFlowError,
};

/// `OrderFlowApi` is the primary API for moving money: placing orders against a user's balance, and topping the
/// balance up.
///
/// Requests are validated here, before the store is touched. The backend then performs each operation as a single
/// atomic unit while holding the user's balance lock.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderFlowDatabase
{
    /// Places an order on behalf of `user_id`, paying for it from the user's balance.
    ///
    /// The whole order is rejected if any item is missing from the restaurant's menu, is unavailable, or if the order
    /// total exceeds the balance. On success the receipt carries the saved order, its priced lines and the new balance.
    pub async fn place_order(&self, user_id: i64, order: NewOrder) -> Result<OrderReceipt, OrderFlowError> {
        validate_order(&order)?;
        let order = merge_repeated_items(order)?;
        trace!(
            "🔄️📦️ User #{user_id} is placing an order at restaurant #{} for {} lines",
            order.restaurant_id,
            order.items.len()
        );
        match self.db.process_new_order(user_id, order).await {
            Ok(receipt) => {
                info!(
                    "🔄️📦️ Order #{} placed by user #{user_id} for {}. New balance: {}",
                    receipt.order.id, receipt.order.total_amount, receipt.balance
                );
                Ok(receipt)
            },
            Err(e) if e.is_client_error() => {
                debug!("🔄️📦️ Order for user #{user_id} rejected: {e}");
                Err(e)
            },
            Err(e) => {
                error!("🔄️📦️ Order for user #{user_id} failed and was rolled back. {e}");
                Err(e)
            },
        }
    }

    /// Adds `amount` to the user's balance and returns the new balance.
    pub async fn top_up(&self, user_id: i64, amount: Money) -> Result<Money, OrderFlowError> {
        let entry = self.top_up_with_entry(user_id, amount).await?;
        Ok(entry.balance_after)
    }

    /// As [`Self::top_up`], but returns the ledger entry that recorded the top-up.
    pub async fn top_up_with_entry(&self, user_id: i64, amount: Money) -> Result<LedgerEntry, OrderFlowError> {
        if !amount.is_positive() {
            return Err(OrderFlowError::InvalidAmount(amount));
        }
        match self.db.process_top_up(user_id, amount).await {
            Ok(entry) => {
                info!("🔄️💰️ User #{user_id} topped up {amount}. New balance: {}", entry.balance_after);
                Ok(entry)
            },
            Err(e) => {
                warn!("🔄️💰️ Top-up of {amount} for user #{user_id} failed. {e}");
                Err(e)
            },
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}

fn validate_order(order: &NewOrder) -> Result<(), OrderFlowError> {
    if order.restaurant_id <= 0 || order.items.is_empty() {
        return Err(OrderFlowError::InvalidOrder("Restaurant ID and items are required".into()));
    }
    if let Some(item) = order.items.iter().find(|i| i.quantity <= 0) {
        return Err(OrderFlowError::InvalidOrder(format!(
            "Quantity for menu item {} must be greater than 0",
            item.menu_item_id
        )));
    }
    Ok(())
}

/// Folds lines that name the same menu item into one, keeping the position of its first appearance. An order stores
/// one line per distinct item.
fn merge_repeated_items(mut order: NewOrder) -> Result<NewOrder, OrderFlowError> {
    let mut merged: Vec<NewOrderItem> = Vec::with_capacity(order.items.len());
    for item in order.items {
        match merged.iter_mut().find(|m| m.menu_item_id == item.menu_item_id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(item.quantity).ok_or_else(|| {
                    OrderFlowError::InvalidOrder(format!("Quantity for menu item {} is too large", item.menu_item_id))
                })?;
            },
            None => merged.push(item),
        }
    }
    order.items = merged;
    Ok(order)
}
