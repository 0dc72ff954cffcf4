//! Request and response bodies for the HTTP API. Field names are camelCase on the wire, and every success response
//! carries `"success": true`.
use chrono::{DateTime, Utc};
use food_common::Money;
use food_engine::{
    db_types::{
        LedgerEntry,
        MenuItem,
        NewOrder,
        NewOrderItem,
        Order,
        OrderItem,
        OrderLine,
        OrderSummary,
        Restaurant,
        User,
    },
    order_objects::OrderReceipt,
};
use serde::{Deserialize, Serialize};

// Missing fields default to empty values so that the engine's validation, rather than the JSON extractor, decides
// what the error message is.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: User,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: User, token: String) -> Self {
        Self { success: true, user, token }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub restaurant_id: i64,
    #[serde(default)]
    pub items: Vec<NewOrderItem>,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

impl From<PlaceOrderRequest> for NewOrder {
    fn from(req: PlaceOrderRequest) -> Self {
        let order = NewOrder::new(req.restaurant_id, req.items);
        match req.delivery_address {
            Some(address) => order.with_delivery_address(address),
            None => order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub id: i64,
    pub total_amount: Money,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlacedResponse {
    pub success: bool,
    pub message: String,
    pub order: PlacedOrder,
    pub balance: Money,
}

impl OrderPlacedResponse {
    pub fn new(receipt: OrderReceipt, currency_symbol: &str) -> Self {
        let message = format!("Order placed! Total: {}", receipt.order.total_amount.with_symbol(currency_symbol));
        let order = PlacedOrder { id: receipt.order.id, total_amount: receipt.order.total_amount, items: receipt.items };
        Self { success: true, message, order, balance: receipt.balance }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub success: bool,
    pub orders: Vec<OrderSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub success: bool,
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantsResponse {
    pub success: bool,
    pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub success: bool,
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopUpRequest {
    #[serde(default)]
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpResponse {
    pub success: bool,
    pub message: String,
    pub balance: Money,
}

impl TopUpResponse {
    pub fn new(amount: Money, balance: Money, currency_symbol: &str) -> Self {
        Self { success: true, message: format!("Topped up {}", amount.with_symbol(currency_symbol)), balance }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub success: bool,
    pub transactions: Vec<LedgerEntry>,
}

/// A position report from a client. Only the shape is checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationReport {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius in metres, as reported by the device.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Milliseconds since the Unix epoch, as reported by the device.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAck {
    pub success: bool,
    pub accepted: bool,
    pub received_at: DateTime<Utc>,
}

impl LocationAck {
    pub fn accepted() -> Self {
        Self { success: true, accepted: true, received_at: Utc::now() }
    }
}
