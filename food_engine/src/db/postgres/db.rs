use std::fmt::Debug;

use log::*;
use sqlx::{migrate, PgPool};

use super::{catalog, ledger, new_pool, orders, users, PostgresDatabaseError};
use crate::{
    db::{
        common::{check_affordable, credit, price_line, total_for_lines},
        traits::{AccountManagement, AuthManagement, CatalogManagement, OrderFlowDatabase},
    },
    db_types::{
        LedgerEntry,
        MenuItem,
        Money,
        NewLedgerEntry,
        NewMenuItem,
        NewOrder,
        NewRestaurant,
        Order,
        OrderItem,
        OrderSummary,
        Restaurant,
        User,
        UserCredentials,
    },
    order_objects::OrderReceipt,
    AccountApiError,
    AuthApiError,
    CatalogApiError,
    OrderFlowError,
};

#[derive(Clone)]
pub struct PostgresDatabase {
    url: String,
    pool: PgPool,
}

impl Debug for PostgresDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PostgresDatabase ({})", self.url)
    }
}

impl OrderFlowDatabase for PostgresDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn process_new_order(&self, user_id: i64, order: NewOrder) -> Result<OrderReceipt, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let mut lines = Vec::with_capacity(order.items.len());
        for requested in &order.items {
            let item = catalog::menu_item_for_restaurant(requested.menu_item_id, order.restaurant_id, &mut tx).await?;
            lines.push(price_line(requested, item)?);
        }
        let total = total_for_lines(&lines)?;
        let balance =
            users::lock_balance(user_id, &mut tx).await?.ok_or(OrderFlowError::AccountNotFound(user_id))?;
        let new_balance = check_affordable(balance, total)?;
        let saved =
            orders::insert_order(user_id, order.restaurant_id, total, &order.delivery_address, &mut tx).await?;
        orders::insert_order_items(saved.id, &lines, &mut tx).await?;
        users::update_balance(user_id, new_balance, &mut tx).await?;
        let entry = ledger::insert_entry(NewLedgerEntry::payment(user_id, saved.id, balance, new_balance), &mut tx).await?;
        tx.commit().await?;
        debug!(
            "🗃️ Order #{} for user #{user_id} saved. {total} debited, balance {balance} -> {new_balance} (ledger #{})",
            saved.id, entry.id
        );
        Ok(OrderReceipt { order: saved, items: lines, balance: new_balance })
    }

    async fn process_top_up(&self, user_id: i64, amount: Money) -> Result<LedgerEntry, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let before =
            users::lock_balance(user_id, &mut tx).await?.ok_or(OrderFlowError::AccountNotFound(user_id))?;
        let after = credit(before, amount)?;
        users::update_balance(user_id, after, &mut tx).await?;
        let entry = ledger::insert_entry(NewLedgerEntry::top_up(user_id, before, after), &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ User #{user_id} topped up by {amount}. Balance {before} -> {after}");
        Ok(entry)
    }

    async fn close(&mut self) -> Result<(), OrderFlowError> {
        self.pool.close().await;
        Ok(())
    }
}

impl AuthManagement for PostgresDatabase {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        users::insert_user(username, password_hash, &mut conn).await
    }

    async fn fetch_credentials(&self, username: &str) -> Result<Option<UserCredentials>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        users::credentials_for_username(username, &mut conn).await
    }

    async fn fetch_user(&self, user_id: i64) -> Result<Option<User>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::user_by_id(user_id, &mut conn).await?;
        Ok(user)
    }
}

impl AccountManagement for PostgresDatabase {
    async fn fetch_orders_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<OrderSummary>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_orders_for_user(user_id, limit, &mut conn).await?;
        Ok(orders)
    }

    async fn fetch_transactions_for_user(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<LedgerEntry>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let entries = ledger::fetch_entries_for_user(user_id, limit, &mut conn).await?;
        Ok(entries)
    }

    async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order(order_id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let items = orders::fetch_order_items(order_id, &mut conn).await?;
        Ok(items)
    }
}

impl CatalogManagement for PostgresDatabase {
    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let restaurants = catalog::fetch_restaurants(&mut conn).await?;
        Ok(restaurants)
    }

    async fn fetch_available_menu(&self, restaurant_id: i64) -> Result<Vec<MenuItem>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let items = catalog::fetch_available_menu(restaurant_id, &mut conn).await?;
        Ok(items)
    }
}

impl PostgresDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, PostgresDatabaseError> {
        trace!("🗃️ Creating new Postgres connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), PostgresDatabaseError> {
        migrate!("./src/db/postgres/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub async fn add_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, PostgresDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let restaurant = catalog::insert_restaurant(restaurant, &mut conn).await?;
        Ok(restaurant)
    }

    pub async fn add_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, PostgresDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let item = catalog::insert_menu_item(item, &mut conn).await?;
        Ok(item)
    }

    pub async fn set_menu_item_availability(
        &self,
        menu_item_id: i64,
        available: bool,
    ) -> Result<(), PostgresDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        catalog::set_menu_item_availability(menu_item_id, available, &mut conn).await?;
        Ok(())
    }
}
