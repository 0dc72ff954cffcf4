//! Pricing and balance rules shared by every backend. These functions are pure; backends call them from inside their
//! open transaction so that a rejection drops the transaction before anything is written.

use crate::{
    db_types::{MenuItem, Money, NewOrderItem, OrderLine},
    OrderFlowError,
};

/// Prices a single requested line against the menu item that was looked up for it.
///
/// `menu_item` is `None` when no item with the requested id exists for the order's restaurant.
pub fn price_line(requested: &NewOrderItem, menu_item: Option<MenuItem>) -> Result<OrderLine, OrderFlowError> {
    let item = menu_item.ok_or(OrderFlowError::ItemNotFound(requested.menu_item_id))?;
    if !item.available {
        return Err(OrderFlowError::ItemUnavailable(item.name));
    }
    let subtotal = item.price.checked_mul(requested.quantity).ok_or_else(|| {
        OrderFlowError::InvalidOrder(format!("The subtotal for menu item {} is too large", item.id))
    })?;
    Ok(OrderLine { menu_item_id: item.id, name: item.name, quantity: requested.quantity, price: item.price, subtotal })
}

pub fn total_for_lines(lines: &[OrderLine]) -> Result<Money, OrderFlowError> {
    lines.iter().try_fold(Money::default(), |total, line| {
        total.checked_add(line.subtotal).ok_or_else(|| OrderFlowError::InvalidOrder("The order total is too large".into()))
    })
}

/// Returns the balance remaining after paying `total`, or [`OrderFlowError::InsufficientBalance`] if the balance does
/// not cover it.
pub fn check_affordable(balance: Money, total: Money) -> Result<Money, OrderFlowError> {
    if balance < total {
        return Err(OrderFlowError::InsufficientBalance { balance, required: total, shortfall: total - balance });
    }
    Ok(balance - total)
}

pub fn credit(balance: Money, amount: Money) -> Result<Money, OrderFlowError> {
    balance.checked_add(amount).ok_or(OrderFlowError::InvalidAmount(amount))
}
