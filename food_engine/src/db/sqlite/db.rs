use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqlitePool};

use super::{catalog, db_url, ledger, new_pool, orders, users, SqliteDatabaseError};
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
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl OrderFlowDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn process_new_order(&self, user_id: i64, order: NewOrder) -> Result<OrderReceipt, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        // The lock must be the first statement in the transaction. See `users::lock_balance`.
        let balance =
            users::lock_balance(user_id, &mut tx).await?.ok_or(OrderFlowError::AccountNotFound(user_id))?;
        let mut lines = Vec::with_capacity(order.items.len());
        for requested in &order.items {
            let item = catalog::menu_item_for_restaurant(requested.menu_item_id, order.restaurant_id, &mut tx).await?;
            lines.push(price_line(requested, item)?);
        }
        let total = total_for_lines(&lines)?;
        let new_balance = check_affordable(balance, total)?;
        let saved =
            orders::insert_order(user_id, order.restaurant_id, total, &order.delivery_address, &mut tx).await?;
        orders::insert_order_items(saved.id, &lines, &mut tx).await?;
        users::update_balance(user_id, new_balance, &mut tx).await?;
        let entry = NewLedgerEntry::payment(user_id, saved.id, balance, new_balance);
        let entry = ledger::insert_entry(entry, &mut tx).await?;
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

impl AuthManagement for SqliteDatabase {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        if users::user_exists(username, &mut conn).await? {
            return Err(AuthApiError::UsernameTaken);
        }
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

impl AccountManagement for SqliteDatabase {
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

impl CatalogManagement for SqliteDatabase {
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

impl SqliteDatabase {
    /// Creates a new database API object, using the URL in `FOS_DATABASE_URL`.
    pub async fn new(max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date using the migrations embedded in the binary.
    pub async fn run_migrations(&self) -> Result<(), SqliteDatabaseError> {
        migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    // Catalog maintenance. The HTTP surface is read-only, so these are used for seeding and by tests.

    pub async fn add_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, SqliteDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let restaurant = catalog::insert_restaurant(restaurant, &mut conn).await?;
        debug!("🗃️ Restaurant '{}' added with id {}", restaurant.name, restaurant.id);
        Ok(restaurant)
    }

    pub async fn add_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, SqliteDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let item = catalog::insert_menu_item(item, &mut conn).await?;
        debug!("🗃️ Menu item '{}' added to restaurant #{}", item.name, item.restaurant_id);
        Ok(item)
    }

    pub async fn set_menu_item_availability(&self, menu_item_id: i64, available: bool) -> Result<(), SqliteDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        catalog::set_menu_item_availability(menu_item_id, available, &mut conn).await?;
        Ok(())
    }
}
