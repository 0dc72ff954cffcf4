use actix_web::{
    http::{header::ContentType, StatusCode},
    test::TestRequest,
    web,
    web::ServiceConfig,
};
use food_engine::{
    db_types::UserCredentials,
    helpers::passwords::hash_password,
    AuthApi,
    AuthApiError,
};
use serde_json::{json, Value};

use super::{
    helpers::{get_auth_config, post_request, send_request, test_user},
    mocks::MockFoodStore,
};
use crate::{
    auth::{JwtClaims, TokenIssuer},
    routes::{LoginRoute, RegisterRoute},
};

const FAST_HASH_COST: u32 = 4;

#[actix_web::test]
async fn register_new_user() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store
        .expect_create_user()
        .withf(|username, hash| username == "alice" && hash.starts_with("$2"))
        .times(1)
        .returning(|username, _| Ok(test_user(1, username, 0)));
    let body = json!({"username": "alice", "password": "secret123"});
    let (status, body) = post_request("", "/auth/register", body, configure(store)).await;
    assert_eq!(status, StatusCode::CREATED);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"], json!({"id": 1, "username": "alice", "balance": 0}));
    let claims = TokenIssuer::new(&get_auth_config()).validate_token(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims, JwtClaims { user_id: 1, username: "alice".into() });
}

#[actix_web::test]
async fn register_trims_the_username() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store
        .expect_create_user()
        .withf(|username, _| username == "bob")
        .times(1)
        .returning(|username, _| Ok(test_user(2, username, 0)));
    let body = json!({"username": "  bob ", "password": "secret123"});
    let (status, body) = post_request("", "/auth/register", body, configure(store)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

#[actix_web::test]
async fn register_with_missing_fields() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("", "/auth/register", json!({"username": "alice"}), configure(no_writes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Username and password are required"}"#);
}

#[actix_web::test]
async fn register_with_short_credentials() {
    let _ = env_logger::try_init().ok();
    let body = json!({"username": "al", "password": "secret123"});
    let (status, body) = post_request("", "/auth/register", body, configure(no_writes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Username must be at least 3 characters"}"#);

    let body = json!({"username": "alice", "password": "12345"});
    let (status, body) = post_request("", "/auth/register", body, configure(no_writes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Password must be at least 6 characters"}"#);
}

#[actix_web::test]
async fn register_duplicate_username() {
    let _ = env_logger::try_init().ok();
    let mut store = MockFoodStore::new();
    store.expect_create_user().times(1).returning(|_, _| Err(AuthApiError::UsernameTaken));
    let body = json!({"username": "alice", "password": "secret123"});
    let (status, body) = post_request("", "/auth/register", body, configure(store)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, r#"{"error":"Username already exists"}"#);
}

#[actix_web::test]
async fn register_with_malformed_json() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::post().uri("/auth/register").insert_header(ContentType::json()).set_payload("{username: ");
    let (status, body) = send_request(req, configure(no_writes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Invalid request body."#), "was: {body}");
}

#[actix_web::test]
async fn login_with_valid_credentials() {
    let _ = env_logger::try_init().ok();
    let store = store_with_alice().await;
    let body = json!({"username": "alice", "password": "secret123"});
    let (status, body) = post_request("", "/auth/login", body, configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"], json!({"id": 1, "username": "alice", "balance": 50000}));
    let claims = TokenIssuer::new(&get_auth_config()).validate_token(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.user_id, 1);
}

#[actix_web::test]
async fn login_with_wrong_password() {
    let _ = env_logger::try_init().ok();
    let store = store_with_alice().await;
    let body = json!({"username": "alice", "password": "not-the-password"});
    let (status, body) = post_request("", "/auth/login", body, configure(store)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid username or password"}"#);
}

#[actix_web::test]
async fn login_with_unknown_username() {
    let _ = env_logger::try_init().ok();
    let store = store_with_alice().await;
    let body = json!({"username": "mallory", "password": "secret123"});
    let (status, body) = post_request("", "/auth/login", body, configure(store)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid username or password"}"#);
}

#[actix_web::test]
async fn login_without_password() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("", "/auth/login", json!({"username": "alice"}), configure(no_writes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Username and password are required"}"#);
}

async fn store_with_alice() -> MockFoodStore {
    let hash = hash_password("secret123", FAST_HASH_COST).await.unwrap();
    let mut store = MockFoodStore::new();
    store.expect_fetch_credentials().returning(move |username| {
        Ok((username == "alice").then(|| UserCredentials { id: 1, username: "alice".into(), password_hash: hash.clone() }))
    });
    store.expect_fetch_user().returning(|id| Ok((id == 1).then(|| test_user(1, "alice", 50_000))));
    store
}

fn no_writes() -> MockFoodStore {
    let mut store = MockFoodStore::new();
    store.expect_create_user().never();
    store.expect_fetch_credentials().never();
    store
}

fn configure(store: MockFoodStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = AuthApi::new(store).with_hash_cost(FAST_HASH_COST);
        cfg.service(RegisterRoute::<MockFoodStore>::new())
            .service(LoginRoute::<MockFoodStore>::new())
            .app_data(web::Data::new(api));
    }
}
