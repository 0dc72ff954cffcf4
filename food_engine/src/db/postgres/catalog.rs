use sqlx::PgConnection;

use crate::db_types::{MenuItem, NewMenuItem, NewRestaurant, Restaurant};

pub async fn fetch_restaurants(conn: &mut PgConnection) -> Result<Vec<Restaurant>, sqlx::Error> {
    sqlx::query_as::<_, Restaurant>(
        "SELECT id, name, description, image_url, rating FROM restaurants ORDER BY name, id",
    )
    .fetch_all(conn)
    .await
}

pub async fn fetch_available_menu(
    restaurant_id: i64,
    conn: &mut PgConnection,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>(
        r#"
            SELECT id, restaurant_id, name, description, price, image_url, available
            FROM menu_items
            WHERE restaurant_id = $1 AND available
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
    conn: &mut PgConnection,
) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>(
        r#"
            SELECT id, restaurant_id, name, description, price, image_url, available
            FROM menu_items
            WHERE id = $1 AND restaurant_id = $2
        "#,
    )
    .bind(menu_item_id)
    .bind(restaurant_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert_restaurant(restaurant: NewRestaurant, conn: &mut PgConnection) -> Result<Restaurant, sqlx::Error> {
    sqlx::query_as::<_, Restaurant>(
        r#"
            INSERT INTO restaurants (name, description, image_url, rating) VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, image_url, rating
        "#,
    )
    .bind(restaurant.name)
    .bind(restaurant.description)
    .bind(restaurant.image_url)
    .bind(restaurant.rating)
    .fetch_one(conn)
    .await
}

pub async fn insert_menu_item(item: NewMenuItem, conn: &mut PgConnection) -> Result<MenuItem, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>(
        r#"
            INSERT INTO menu_items (restaurant_id, name, description, price, image_url, available)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, restaurant_id, name, description, price, image_url, available
        "#,
    )
    .bind(item.restaurant_id)
    .bind(item.name)
    .bind(item.description)
    .bind(item.price)
    .bind(item.image_url)
    .bind(item.available)
    .fetch_one(conn)
    .await
}

pub async fn set_menu_item_availability(
    menu_item_id: i64,
    available: bool,
    conn: &mut PgConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE menu_items SET available = $1 WHERE id = $2").bind(available).bind(menu_item_id).execute(conn).await?;
    Ok(())
}
