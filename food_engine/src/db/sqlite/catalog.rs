use sqlx::SqliteConnection;

use super::single_row;
use crate::db_types::{MenuItem, NewMenuItem, NewRestaurant, Restaurant};

pub async fn fetch_restaurants(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, sqlx::Error> {
    sqlx::query_as::<_, Restaurant>(
        "SELECT id, name, description, image_url, rating FROM restaurants ORDER BY name, id",
    )
    .fetch_all(conn)
    .await
}

pub async fn fetch_available_menu(
    restaurant_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>(
        r#"
            SELECT id, restaurant_id, name, description, price, image_url, available
            FROM menu_items
            WHERE restaurant_id = ? AND available = TRUE
            ORDER BY name, id
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(conn)
    .await
}

/// Looks up a menu item by id, scoped to the given restaurant. Items from another restaurant are treated as missing.
pub async fn menu_item_for_restaurant(
    menu_item_id: i64,
    restaurant_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>(
        r#"
            SELECT id, restaurant_id, name, description, price, image_url, available
            FROM menu_items
            WHERE id = ? AND restaurant_id = ?
        "#,
    )
    .bind(menu_item_id)
    .bind(restaurant_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert_restaurant(restaurant: NewRestaurant, conn: &mut SqliteConnection) -> Result<Restaurant, sqlx::Error> {
    sqlx::query_as::<_, Restaurant>(
        r#"
            INSERT INTO restaurants (name, description, image_url, rating) VALUES (?, ?, ?, ?)
            RETURNING id, name, description, image_url, rating
        "#,
    )
    .bind(restaurant.name)
    .bind(restaurant.description)
    .bind(restaurant.image_url)
    .bind(restaurant.rating)
    .fetch_all(conn)
    .await
    .and_then(single_row)
}

pub async fn insert_menu_item(item: NewMenuItem, conn: &mut SqliteConnection) -> Result<MenuItem, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>(
        r#"
            INSERT INTO menu_items (restaurant_id, name, description, price, image_url, available)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, restaurant_id, name, description, price, image_url, available
        "#,
    )
    .bind(item.restaurant_id)
    .bind(item.name)
    .bind(item.description)
    .bind(item.price)
    .bind(item.image_url)
    .bind(item.available)
    .fetch_all(conn)
    .await
    .and_then(single_row)
}

pub async fn set_menu_item_availability(
    menu_item_id: i64,
    available: bool,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE menu_items SET available = ? WHERE id = ?").bind(available).bind(menu_item_id).execute(conn).await?;
    Ok(())
}
