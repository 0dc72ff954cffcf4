use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
pub use food_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Invalid value for {0}: {1}")]
pub struct ConversionError(&'static str, String);

//--------------------------------------        User           ---------------------------------------------------------
/// A registered user as seen by the rest of the system. The password hash lives in
/// [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub balance: Money,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 0,
            username: String::default(),
            balance: Money::default(),
            created_at: DateTime::<Utc>::MIN_UTC,
            updated_at: DateTime::<Utc>::MIN_UTC,
        }
    }
}

//--------------------------------------   UserCredentials     ---------------------------------------------------------
/// The login record for a user. Only ever used to check a password; never serialised.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

//--------------------------------------     Restaurant        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, Default)]
pub struct NewRestaurant {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub rating: f64,
}

impl NewRestaurant {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }
}

//--------------------------------------      MenuItem         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub image_url: Option<String>,
    pub available: bool,
}

#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub image_url: Option<String>,
    pub available: bool,
}

impl NewMenuItem {
    pub fn new<S: Into<String>>(restaurant_id: i64, name: S, price: Money) -> Self {
        Self { restaurant_id, name: name.into(), description: None, price, image_url: None, available: true }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// The order has been paid for and is waiting for the restaurant.
    Pending,
    /// The restaurant has accepted the order.
    Confirmed,
    /// The order has been handed over to the customer.
    Delivered,
    /// The order was cancelled.
    Cancelled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "pending"),
            OrderStatusType::Confirmed => write!(f, "confirmed"),
            OrderStatusType::Delivered => write!(f, "delivered"),
            OrderStatusType::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError("order status", s.to_string())),
        }
    }
}

impl TryFrom<String> for OrderStatusType {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

//--------------------------------------        Order          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub total_amount: Money,
    #[sqlx(try_from = "String")]
    pub status: OrderStatusType,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------      OrderItem        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    /// Unit price at the time of purchase
    pub price: Money,
    pub subtotal: Money,
}

//--------------------------------------    OrderSummary       ---------------------------------------------------------
/// The order history view: an order joined with the name of the restaurant it was placed at.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i64,
    pub total_amount: Money,
    #[sqlx(try_from = "String")]
    pub status: OrderStatusType,
    pub delivery_address: String,
    pub restaurant_name: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------        NewOrder       ---------------------------------------------------------
pub const DEFAULT_DELIVERY_ADDRESS: &str = "Not specified";

/// A single requested line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub menu_item_id: i64,
    pub quantity: i64,
}

impl NewOrderItem {
    pub fn new(menu_item_id: i64, quantity: i64) -> Self {
        Self { menu_item_id, quantity }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub restaurant_id: i64,
    /// The requested lines, in the order the customer supplied them
    pub items: Vec<NewOrderItem>,
    pub delivery_address: String,
}

impl NewOrder {
    pub fn new(restaurant_id: i64, items: Vec<NewOrderItem>) -> Self {
        Self { restaurant_id, items, delivery_address: DEFAULT_DELIVERY_ADDRESS.to_string() }
    }

    /// Sets the delivery address. Blank addresses are replaced with [`DEFAULT_DELIVERY_ADDRESS`].
    pub fn with_delivery_address<S: AsRef<str>>(mut self, address: S) -> Self {
        let address = address.as_ref().trim();
        self.delivery_address =
            if address.is_empty() { DEFAULT_DELIVERY_ADDRESS.to_string() } else { address.to_string() };
        self
    }
}

//--------------------------------------      OrderLine        ---------------------------------------------------------
/// A priced line of an order, built from the catalog at the time the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: Money,
    pub subtotal: Money,
}

//--------------------------------------   TransactionType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent on an order. Ledger amounts of this type are negative.
    Payment,
    /// Money added to the wallet. Ledger amounts of this type are positive.
    TopUp,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Payment => write!(f, "payment"),
            TransactionType::TopUp => write!(f, "topup"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(Self::Payment),
            "topup" => Ok(Self::TopUp),
            s => Err(ConversionError("transaction type", s.to_string())),
        }
    }
}

impl TryFrom<String> for TransactionType {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

//--------------------------------------     LedgerEntry       ---------------------------------------------------------
/// An append-only record of a single balance change on a user's wallet.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub amount: Money,
    #[sqlx(try_from = "String")]
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub balance_before: Money,
    pub balance_after: Money,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLedgerEntry {
    pub user_id: i64,
    pub amount: Money,
    pub transaction_type: TransactionType,
    pub description: String,
    pub balance_before: Money,
    pub balance_after: Money,
}

impl NewLedgerEntry {
    pub fn payment(user_id: i64, order_id: i64, balance_before: Money, balance_after: Money) -> Self {
        Self {
            user_id,
            amount: balance_after - balance_before,
            transaction_type: TransactionType::Payment,
            description: format!("Payment for order #{order_id}"),
            balance_before,
            balance_after,
        }
    }

    pub fn top_up(user_id: i64, balance_before: Money, balance_after: Money) -> Self {
        Self {
            user_id,
            amount: balance_after - balance_before,
            transaction_type: TransactionType::TopUp,
            description: "Balance top-up".to_string(),
            balance_before,
            balance_after,
        }
    }
}
