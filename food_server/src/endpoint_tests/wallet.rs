use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use food_common::Money;
use food_engine::{
    db_types::{LedgerEntry, TransactionType},
    AccountApi,
    AuthApi,
    OrderFlowApi,
    OrderFlowError,
};
use serde_json::{json, Value};

use super::{
    helpers::{auth_api_for, get_request, post_request, test_user, valid_token},
    mocks::MockFoodStore,
};
use crate::routes::{MyTransactionsRoute, TopUpRoute};

#[actix_web::test]
async fn top_up_wallet() {
    let _ = env_logger::try_init().ok();
    let user = test_user(1, "alice", 15_000);
    let token = valid_token(&user);
    let mut store = MockFoodStore::new();
    store
        .expect_process_top_up()
        .withf(|user_id, amount| *user_id == 1 && *amount == Money::from(20_000))
        .times(1)
        .returning(|user_id, amount| Ok(ledger_entry(7, user_id, amount, TransactionType::TopUp, 15_000)));
    let configure = configure_top_up(auth_api_for(Some(user)), store);
    let (status, body) = post_request(&token, "/wallet/topup", json!({"amount": 20000}), configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"message":"Topped up Rp 20.000","balance":35000}"#);
}

#[actix_web::test]
async fn top_up_with_zero_amount() {
    let _ = env_logger::try_init().ok();
    let user = test_user(1, "alice", 15_000);
    let token = valid_token(&user);
    let mut store = MockFoodStore::new();
    store.expect_process_top_up().never();
    let configure = configure_top_up(auth_api_for(Some(user)), store);
    let (status, body) = post_request(&token, "/wallet/topup", json!({"amount": 0}), configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid amount. Must be greater than 0"}"#);
}

#[actix_web::test]
async fn top_up_with_negative_or_missing_amount() {
    let _ = env_logger::try_init().ok();
    let user = test_user(1, "alice", 15_000);
    let token = valid_token(&user);
    for body in [json!({"amount": -5000}), json!({})] {
        let mut store = MockFoodStore::new();
        store.expect_process_top_up().never();
        let configure = configure_top_up(auth_api_for(Some(user.clone())), store);
        let (status, body) = post_request(&token, "/wallet/topup", body, configure).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Invalid amount. Must be greater than 0"}"#);
    }
}

#[actix_web::test]
async fn top_up_for_a_vanished_account() {
    let _ = env_logger::try_init().ok();
    let user = test_user(1, "alice", 15_000);
    let token = valid_token(&user);
    let mut store = MockFoodStore::new();
    store.expect_process_top_up().returning(|user_id, _| Err(OrderFlowError::AccountNotFound(user_id)));
    let configure = configure_top_up(auth_api_for(Some(user)), store);
    let (status, _) = post_request(&token, "/wallet/topup", json!({"amount": 1000}), configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn top_up_without_token() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_process_top_up().never();
    let configure = configure_top_up(auth_api_for(None), store);
    let (status, body) = post_request("", "/wallet/topup", json!({"amount": 1000}), configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"No token provided"}"#);
}

#[actix_web::test]
async fn fetch_my_transactions() {
    let _ = env_logger::try_init().ok();
    let user = test_user(1, "alice", 25_000);
    let token = valid_token(&user);
    let mut store = MockFoodStore::new();
    store.expect_fetch_transactions_for_user().withf(|user_id, _| *user_id == 1).times(1).returning(|user_id, _| {
        Ok(vec![
            ledger_entry(8, user_id, Money::from(-10_000), TransactionType::Payment, 35_000),
            ledger_entry(7, user_id, Money::from(20_000), TransactionType::TopUp, 15_000),
        ])
    });
    let configure = configure_history(auth_api_for(Some(user)), store);
    let (status, body) = get_request(&token, "/wallet/transactions", configure).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    let transactions = body["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(
        transactions[0],
        json!({
            "id": 8,
            "amount": -10000,
            "type": "payment",
            "description": "Payment for order #3",
            "balanceBefore": 35000,
            "balanceAfter": 25000,
            "createdAt": "2024-03-11T16:03:25Z"
        })
    );
    assert_eq!(transactions[1]["type"], "topup");
    assert!(transactions[0].get("userId").is_none());
}

#[actix_web::test]
async fn fetch_transactions_without_token() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_fetch_transactions_for_user().never();
    let (status, body) = get_request("", "/wallet/transactions", configure_history(auth_api_for(None), store)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"No token provided"}"#);
}

fn ledger_entry(id: i64, user_id: i64, amount: Money, kind: TransactionType, balance_before: i64) -> LedgerEntry {
    let balance_before = Money::from(balance_before);
    let description = match kind {
        TransactionType::Payment => "Payment for order #3".to_string(),
        TransactionType::TopUp => "Balance top-up".to_string(),
    };
    LedgerEntry {
        id,
        user_id,
        amount,
        transaction_type: kind,
        description,
        balance_before,
        balance_after: balance_before + amount,
        created_at: Utc.with_ymd_and_hms(2024, 3, 11, 16, 3, 25).unwrap(),
    }
}

fn configure_top_up(auth_api: AuthApi<MockFoodStore>, store: MockFoodStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(TopUpRoute::<MockFoodStore>::new())
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(OrderFlowApi::new(store)));
    }
}

fn configure_history(auth_api: AuthApi<MockFoodStore>, store: MockFoodStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(MyTransactionsRoute::<MockFoodStore>::new())
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(AccountApi::new(store)));
    }
}
