use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{Days, TimeZone, Utc};
use food_common::Money;
use food_engine::{
    db_types::{NewOrder, NewOrderItem, Order, OrderItem, OrderLine, OrderStatusType, OrderSummary, User},
    order_objects::OrderReceipt,
    AccountApi,
    AuthApi,
    OrderFlowApi,
    OrderFlowError,
};
use log::debug;
use serde_json::{json, Value};

use super::{
    helpers::{auth_api_for, get_request, issue_token, post_request, test_user, unused_auth_api, valid_token},
    mocks::MockFoodStore,
};
use crate::{
    auth::JwtClaims,
    routes::{MyOrdersRoute, OrderByIdRoute, PlaceOrderRoute},
};

fn alice() -> User {
    test_user(1, "alice", 50_000)
}

#[actix_web::test]
async fn place_order_without_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("", "/orders", order_body(), configure(unused_auth_api(), MockFoodStore::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"No token provided"}"#);
}

#[actix_web::test]
async fn place_order_with_invalid_signature() {
    let _ = env_logger::try_init().ok();
    let mut token = valid_token(&alice());
    token.replace_range(token.len() - 10..token.len() - 5, "00000");
    debug!("Calling /orders with invalid token {token}");
    let (status, body) =
        post_request(&token, "/orders", order_body(), configure(unused_auth_api(), MockFoodStore::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid token"}"#);
}

#[actix_web::test]
async fn place_order_with_expired_token() {
    let _ = env_logger::try_init().ok();
    let claims = JwtClaims { user_id: 1, username: "alice".into() };
    let token = issue_token(claims, Utc::now() - Days::new(1));
    let (status, body) =
        post_request(&token, "/orders", order_body(), configure(unused_auth_api(), MockFoodStore::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid token"}"#);
}

#[actix_web::test]
async fn place_order_for_deleted_user() {
    let _ = env_logger::try_init().ok();
    let token = valid_token(&alice());
    let (status, body) =
        post_request(&token, "/orders", order_body(), configure(auth_api_for(None), MockFoodStore::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"User not found"}"#);
}

#[actix_web::test]
async fn place_order() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store
        .expect_process_new_order()
        .withf(|user_id, order| {
            *user_id == 1 &&
                order == &NewOrder::new(1, vec![NewOrderItem::new(1, 2), NewOrderItem::new(2, 1)])
                    .with_delivery_address("Jl. Sudirman 1")
        })
        .times(1)
        .returning(|_, _| Ok(receipt()));
    let token = valid_token(&alice());
    let (status, body) =
        post_request(&token, "/orders", order_body(), configure(auth_api_for(Some(alice())), store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PLACED_ORDER_JSON);
}

#[actix_web::test]
async fn place_order_with_insufficient_balance() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_process_new_order().times(1).returning(|_, _| {
        Err(OrderFlowError::InsufficientBalance {
            balance: Money::from(10_000),
            required: Money::from(25_000),
            shortfall: Money::from(15_000),
        })
    });
    let user = test_user(1, "alice", 10_000);
    let token = valid_token(&user);
    let body = json!({"restaurantId": 1, "items": [{"menuItemId": 3, "quantity": 1}]});
    let (status, body) = post_request(&token, "/orders", body, configure(auth_api_for(Some(user)), store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"error": "Insufficient balance", "balance": 10000, "required": 25000, "shortfall": 15000}));
}

#[actix_web::test]
async fn place_order_with_unknown_item() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_process_new_order().times(1).returning(|_, _| Err(OrderFlowError::ItemNotFound(99)));
    let token = valid_token(&alice());
    let body = json!({"restaurantId": 1, "items": [{"menuItemId": 99, "quantity": 1}]});
    let (status, body) = post_request(&token, "/orders", body, configure(auth_api_for(Some(alice())), store)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Menu item 99 not found"}"#);
}

#[actix_web::test]
async fn place_order_with_unavailable_item() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store
        .expect_process_new_order()
        .times(1)
        .returning(|_, _| Err(OrderFlowError::ItemUnavailable("Rendang".into())));
    let token = valid_token(&alice());
    let body = json!({"restaurantId": 1, "items": [{"menuItemId": 4, "quantity": 1}]});
    let (status, body) = post_request(&token, "/orders", body, configure(auth_api_for(Some(alice())), store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Menu item Rendang is not available"}"#);
}

#[actix_web::test]
async fn empty_orders_never_reach_the_store() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_process_new_order().never();
    let token = valid_token(&alice());
    let body = json!({"restaurantId": 1, "items": []});
    let (status, body) = post_request(&token, "/orders", body, configure(auth_api_for(Some(alice())), store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Restaurant ID and items are required"}"#);
}

#[actix_web::test]
async fn store_faults_are_reported_as_internal_errors() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store
        .expect_process_new_order()
        .times(1)
        .returning(|_, _| Err(OrderFlowError::DatabaseError("database is locked".into())));
    let token = valid_token(&alice());
    let (status, body) =
        post_request(&token, "/orders", order_body(), configure(auth_api_for(Some(alice())), store)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Internal server error"}"#);
}

#[actix_web::test]
async fn fetch_my_orders() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_orders_for_user().withf(|id, limit| *id == 1 && *limit == 50).returning(|_, _| Ok(orders()));
    let token = valid_token(&alice());
    let (status, body) = get_request(&token, "/orders", configure_history(auth_api_for(Some(alice())), store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ORDERS_JSON);
}

#[actix_web::test]
async fn fetch_my_orders_no_headers() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/orders", configure_history(unused_auth_api(), MockFoodStore::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"No token provided"}"#);
}

#[actix_web::test]
async fn fetch_order_by_id() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_order().returning(|id| Ok((id == 12).then(|| order(12, 1))));
    store.expect_fetch_order_items().withf(|id| *id == 12).returning(|_| Ok(order_items()));
    let token = valid_token(&alice());
    let (status, body) =
        get_request(&token, "/orders/12", configure_history(auth_api_for(Some(alice())), store)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["order"]["id"], 12);
    assert_eq!(body["order"]["totalAmount"], 35_000);
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["menuItemId"], 1);
    assert_eq!(body["items"][0]["subtotal"], 20_000);
}

#[actix_web::test]
async fn try_fetch_another_users_order() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_order().returning(|id| Ok(Some(order(id, 2))));
    store.expect_fetch_order_items().never();
    let token = valid_token(&alice());
    let (status, body) =
        get_request(&token, "/orders/13", configure_history(auth_api_for(Some(alice())), store)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Order 13 not found"}"#);
}

#[actix_web::test]
async fn fetch_order_with_invalid_id() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_order().never();
    let token = valid_token(&alice());
    let (status, body) =
        get_request(&token, "/orders/latest", configure_history(auth_api_for(Some(alice())), store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid order ID"}"#);
}

fn order_body() -> Value {
    json!({
        "restaurantId": 1,
        "items": [{"menuItemId": 1, "quantity": 2}, {"menuItemId": 2, "quantity": 1}],
        "deliveryAddress": "Jl. Sudirman 1"
    })
}

fn configure(auth_api: AuthApi<MockFoodStore>, store: MockFoodStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(PlaceOrderRoute::<MockFoodStore>::new())
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(OrderFlowApi::new(store)));
    }
}

fn configure_history(auth_api: AuthApi<MockFoodStore>, store: MockFoodStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(MyOrdersRoute::<MockFoodStore>::new())
            .service(OrderByIdRoute::<MockFoodStore>::new())
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(AccountApi::new(store)));
    }
}

fn order(id: i64, user_id: i64) -> Order {
    Order {
        id,
        user_id,
        restaurant_id: 1,
        total_amount: Money::from(35_000),
        status: OrderStatusType::Pending,
        delivery_address: "Jl. Sudirman 1".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
    }
}

fn order_items() -> Vec<OrderItem> {
    vec![
        OrderItem {
            id: 1,
            order_id: 12,
            menu_item_id: 1,
            quantity: 2,
            price: Money::from(10_000),
            subtotal: Money::from(20_000),
        },
        OrderItem {
            id: 2,
            order_id: 12,
            menu_item_id: 2,
            quantity: 1,
            price: Money::from(15_000),
            subtotal: Money::from(15_000),
        },
    ]
}

// Mock response to `process_new_order`
fn receipt() -> OrderReceipt {
    OrderReceipt {
        order: order(12, 1),
        items: vec![
            OrderLine {
                menu_item_id: 1,
                name: "Nasi Goreng".to_string(),
                quantity: 2,
                price: Money::from(10_000),
                subtotal: Money::from(20_000),
            },
            OrderLine {
                menu_item_id: 2,
                name: "Sate Ayam".to_string(),
                quantity: 1,
                price: Money::from(15_000),
                subtotal: Money::from(15_000),
            },
        ],
        balance: Money::from(15_000),
    }
}

// Mock response to `fetch_orders_for_user`
fn orders() -> Vec<OrderSummary> {
    vec![
        OrderSummary {
            id: 2,
            total_amount: Money::from(15_000),
            status: OrderStatusType::Pending,
            delivery_address: "Not specified".to_string(),
            restaurant_name: "Bakso Pak Kumis".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 2, 8, 0, 0).unwrap(),
        },
        OrderSummary {
            id: 1,
            total_amount: Money::from(35_000),
            status: OrderStatusType::Delivered,
            delivery_address: "Jl. Sudirman 1".to_string(),
            restaurant_name: "Warung Makan Sederhana".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
        },
    ]
}

const PLACED_ORDER_JSON: &str = r#"{"success":true,"message":"Order placed! Total: Rp 35.000","order":{"id":12,"totalAmount":35000,"items":[{"menuItemId":1,"name":"Nasi Goreng","quantity":2,"price":10000,"subtotal":20000},{"menuItemId":2,"name":"Sate Ayam","quantity":1,"price":15000,"subtotal":15000}]},"balance":15000}"#;

const ORDERS_JSON: &str = r#"{"success":true,"orders":[{"id":2,"totalAmount":15000,"status":"pending","deliveryAddress":"Not specified","restaurantName":"Bakso Pak Kumis","createdAt":"2024-06-02T08:00:00Z"},{"id":1,"totalAmount":35000,"status":"delivered","deliveryAddress":"Jl. Sudirman 1","restaurantName":"Warung Makan Sederhana","createdAt":"2024-06-01T12:30:00Z"}]}"#;
