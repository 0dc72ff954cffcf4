//! A small catalog and user fixtures with known prices.

use crate::{
    db_types::{MenuItem, Money, NewMenuItem, NewRestaurant, Restaurant, User},
    AuthApi,
    OrderFlowApi,
    SqliteDatabase,
};

/// The bcrypt cost used in tests. The minimum bcrypt allows, so that tests stay fast.
pub const TEST_HASH_COST: u32 = 4;

#[derive(Debug, Clone)]
pub struct SeededCatalog {
    pub warung: Restaurant,
    pub nasi_goreng: MenuItem,
    pub es_teh: MenuItem,
    pub sate_ayam: MenuItem,
    pub rendang: MenuItem,
    pub bakso_place: Restaurant,
    pub bakso: MenuItem,
}

/// Seeds two restaurants.
///
/// | Restaurant      | Item        | Price  | Available |
/// |-----------------|-------------|--------|-----------|
/// | Warung Nusa     | Nasi Goreng | 10 000 | yes       |
/// | Warung Nusa     | Es Teh      |  5 000 | yes       |
/// | Warung Nusa     | Sate Ayam   | 15 000 | yes       |
/// | Warung Nusa     | Rendang     | 25 000 | no        |
/// | Bakso Pak Kumis | Bakso       | 12 000 | yes       |
pub async fn seed_catalog(db: &SqliteDatabase) -> SeededCatalog {
    let warung = db
        .add_restaurant(NewRestaurant::new("Warung Nusa").with_description("Home cooking").with_rating(4.5))
        .await
        .expect("Error adding restaurant");
    let bakso_place =
        db.add_restaurant(NewRestaurant::new("Bakso Pak Kumis").with_rating(4.2)).await.expect("Error adding restaurant");
    let nasi_goreng = add_item(db, NewMenuItem::new(warung.id, "Nasi Goreng", Money::from(10_000))).await;
    let es_teh = add_item(db, NewMenuItem::new(warung.id, "Es Teh", Money::from(5_000))).await;
    let sate_ayam = add_item(db, NewMenuItem::new(warung.id, "Sate Ayam", Money::from(15_000))).await;
    let rendang = add_item(db, NewMenuItem::new(warung.id, "Rendang", Money::from(25_000)).unavailable()).await;
    let bakso = add_item(db, NewMenuItem::new(bakso_place.id, "Bakso", Money::from(12_000))).await;
    SeededCatalog { warung, nasi_goreng, es_teh, sate_ayam, rendang, bakso_place, bakso }
}

async fn add_item(db: &SqliteDatabase, item: NewMenuItem) -> MenuItem {
    db.add_menu_item(item).await.expect("Error adding menu item")
}

/// Registers a user and, if `balance` is positive, tops the wallet up to that amount.
pub async fn user_with_balance(db: &SqliteDatabase, username: &str, balance: i64) -> User {
    let auth = AuthApi::new(db.clone()).with_hash_cost(TEST_HASH_COST);
    let user = auth.register(username, "password123").await.expect("Error registering user");
    if balance > 0 {
        OrderFlowApi::new(db.clone()).top_up(user.id, Money::from(balance)).await.expect("Error topping up");
    }
    auth.fetch_user(user.id).await.expect("Error fetching user")
}
