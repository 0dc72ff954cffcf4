use actix_web::{http::StatusCode, web, web::ServiceConfig};
use food_common::Money;
use food_engine::{
    db_types::{MenuItem, Restaurant},
    CatalogApi,
    CatalogApiError,
};
use serde_json::{json, Value};

use super::{helpers::get_request, mocks::MockFoodStore};
use crate::routes::{MenuRoute, RestaurantsRoute};

#[actix_web::test]
async fn list_restaurants() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_restaurants().times(1).returning(|| Ok(restaurants()));
    let (status, body) = get_request("", "/restaurants", configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, RESTAURANTS_JSON);
}

#[actix_web::test]
async fn list_restaurants_when_the_store_is_down() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_restaurants().returning(|| Err(CatalogApiError::DatabaseError("pool timed out".into())));
    let (status, body) = get_request("", "/restaurants", configure(store)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Internal server error"}"#);
}

#[actix_web::test]
async fn menu_for_restaurant() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_available_menu().withf(|id| *id == 1).times(1).returning(|_| Ok(menu()));
    let (status, body) = get_request("", "/restaurants/1/menu", configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["menuItems"][0],
        json!({
            "id": 1,
            "restaurantId": 1,
            "name": "Nasi Goreng",
            "description": "Fried rice with egg",
            "price": 10000,
            "imageUrl": null,
            "available": true
        })
    );
    assert_eq!(body["menuItems"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn menu_for_unknown_restaurant_is_empty() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_available_menu().returning(|_| Ok(vec![]));
    let (status, body) = get_request("", "/restaurants/404/menu", configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"menuItems":[]}"#);
}

#[actix_web::test]
async fn menu_with_invalid_restaurant_id() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_available_menu().never();
    let (status, body) = get_request("", "/restaurants/warung/menu", configure(store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid restaurant ID"}"#);
}

fn configure(store: MockFoodStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(RestaurantsRoute::<MockFoodStore>::new())
            .service(MenuRoute::<MockFoodStore>::new())
            .app_data(web::Data::new(CatalogApi::new(store)));
    }
}

fn restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant {
            id: 2,
            name: "Bakso Pak Kumis".to_string(),
            description: None,
            image_url: None,
            rating: 4.5,
        },
        Restaurant {
            id: 1,
            name: "Warung Makan Sederhana".to_string(),
            description: Some("Home-style Indonesian food".to_string()),
            image_url: Some("/images/warung.jpg".to_string()),
            rating: 4.8,
        },
    ]
}

fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: 1,
            restaurant_id: 1,
            name: "Nasi Goreng".to_string(),
            description: Some("Fried rice with egg".to_string()),
            price: Money::from(10_000),
            image_url: None,
            available: true,
        },
        MenuItem {
            id: 3,
            restaurant_id: 1,
            name: "Sate Ayam".to_string(),
            description: None,
            price: Money::from(15_000),
            image_url: None,
            available: true,
        },
    ]
}

const RESTAURANTS_JSON: &str = r#"{"success":true,"restaurants":[{"id":2,"name":"Bakso Pak Kumis","description":null,"imageUrl":null,"rating":4.5},{"id":1,"name":"Warung Makan Sederhana","description":"Home-style Indonesian food","imageUrl":"/images/warung.jpg","rating":4.8}]}"#;
