use serde::{Deserialize, Serialize};

use crate::db_types::{Money, Order, OrderItem, OrderLine};

/// The outcome of a successfully placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order: Order,
    /// The priced lines, in the order they were requested.
    pub items: Vec<OrderLine>,
    /// The purchaser's balance after paying for the order.
    pub balance: Money,
}

/// A single order with its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
