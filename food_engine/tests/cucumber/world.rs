use std::collections::HashMap;

use cucumber::World;
use food_engine::{
    db_types::{MenuItem, Restaurant, User},
    order_objects::OrderReceipt,
    test_utils::prepare_env::{create_database, random_db_path, run_migrations},
    AccountApi,
    AuthApi,
    OrderFlowApi,
    OrderFlowError,
    SqliteDatabase,
};
use log::*;

#[derive(Default, Debug, World)]
pub struct FoodWorld {
    pub system: Option<FoodOrderingSystem>,
    pub users: HashMap<String, User>,
    pub restaurants: HashMap<String, Restaurant>,
    pub menu_items: HashMap<String, MenuItem>,
    pub last_receipt: Option<OrderReceipt>,
    pub last_error: Option<OrderFlowError>,
}

#[derive(Debug)]
pub struct FoodOrderingSystem {
    pub db_path: String,
    pub db: SqliteDatabase,
    pub api: OrderFlowApi<SqliteDatabase>,
}

impl FoodWorld {
    pub fn system(&self) -> &FoodOrderingSystem {
        self.system.as_ref().expect("System not initialised. Start with 'Given a fresh install'")
    }

    pub fn api(&self) -> &OrderFlowApi<SqliteDatabase> {
        &self.system().api
    }

    pub fn accounts(&self) -> AccountApi<SqliteDatabase> {
        AccountApi::new(self.system().db.clone())
    }

    pub fn auth(&self) -> AuthApi<SqliteDatabase> {
        AuthApi::new(self.system().db.clone())
    }

    pub fn user(&self, name: &str) -> &User {
        self.users.get(name).unwrap_or_else(|| panic!("User {name} has not been registered"))
    }

    pub fn menu_item(&self, name: &str) -> &MenuItem {
        self.menu_items.get(name).unwrap_or_else(|| panic!("Menu item {name} does not exist"))
    }

    pub fn restaurant(&self, name: &str) -> &Restaurant {
        self.restaurants.get(name).unwrap_or_else(|| panic!("Restaurant {name} does not exist"))
    }
}

impl FoodOrderingSystem {
    pub async fn new() -> Self {
        let url = prepare_test_env().await;
        let db = SqliteDatabase::new_with_url(&url, 1).await.expect("Error creating connection to database");
        debug!("Created database: {url}");
        let api = OrderFlowApi::new(db.clone());
        Self { db_path: url, db, api }
    }
}

pub async fn prepare_test_env() -> String {
    let path = random_db_path();
    create_database(&path).await;
    run_migrations(&path).await;
    path
}
