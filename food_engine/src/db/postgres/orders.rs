use log::trace;
use sqlx::PgConnection;

use crate::db_types::{Money, Order, OrderItem, OrderLine, OrderStatusType, OrderSummary};

/// Inserts a new `pending` order. This is not atomic on its own: call it inside a transaction (passing `&mut tx`) so
/// that the order, its line items and the payment are written together.
pub async fn insert_order(
    user_id: i64,
    restaurant_id: i64,
    total_amount: Money,
    delivery_address: &str,
    conn: &mut PgConnection,
) -> Result<Order, sqlx::Error> {
    let order = sqlx::query_as::<_, Order>(
        r#"
            INSERT INTO orders (user_id, restaurant_id, total_amount, status, delivery_address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, restaurant_id, total_amount, status, delivery_address, created_at
        "#,
    )
    .bind(user_id)
    .bind(restaurant_id)
    .bind(total_amount)
    .bind(OrderStatusType::Pending.to_string())
    .bind(delivery_address)
    .fetch_one(conn)
    .await?;
    trace!("🗃️ Order #{} inserted for user #{user_id}", order.id);
    Ok(order)
}

pub async fn insert_order_items(
    order_id: i64,
    lines: &[OrderLine],
    conn: &mut PgConnection,
) -> Result<(), sqlx::Error> {
    for line in lines {
        sqlx::query(
            r#"
                INSERT INTO order_items (order_id, menu_item_id, quantity, price, subtotal)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(order_id)
        .bind(line.menu_item_id)
        .bind(line.quantity)
        .bind(line.price)
        .bind(line.subtotal)
        .execute(&mut *conn)
        .await?;
    }
    trace!("🗃️ {} line items inserted for order #{order_id}", lines.len());
    Ok(())
}

pub async fn fetch_order(order_id: i64, conn: &mut PgConnection) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        r#"
            SELECT id, user_id, restaurant_id, total_amount, status, delivery_address, created_at
            FROM orders
            WHERE id = $1
        "#,
    )
    .bind(order_id)
    .fetch_optional(conn)
    .await
}

pub async fn fetch_order_items(order_id: i64, conn: &mut PgConnection) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, menu_item_id, quantity, price, subtotal FROM order_items WHERE order_id = $1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(conn)
    .await
}

/// The user's most recent orders, joined with the restaurant name, newest first.
pub async fn fetch_orders_for_user(
    user_id: i64,
    limit: i64,
    conn: &mut PgConnection,
) -> Result<Vec<OrderSummary>, sqlx::Error> {
    sqlx::query_as::<_, OrderSummary>(
        r#"
            SELECT o.id, o.total_amount, o.status, o.delivery_address, r.name AS restaurant_name, o.created_at
            FROM orders o
            JOIN restaurants r ON o.restaurant_id = r.id
            WHERE o.user_id = $1
            ORDER BY o.created_at DESC, o.id DESC
            LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(conn)
    .await
}
