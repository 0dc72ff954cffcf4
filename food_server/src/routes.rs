//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a few lines MUST push their work down into the engine APIs. Keep this module neat and
//! tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Every store call is `async`, and password hashing runs on the
//! blocking pool, so no handler here blocks a worker.
//!
//! Authenticated routes are wrapped in [`crate::middleware::BearerAuthFactory`], which verifies the access token and
//! re-reads the user before the handler runs. Handlers receive that user through the [`AuthenticatedUser`] extractor.
use actix_web::{get, post, web, HttpResponse, Responder};
use food_engine::{
    helpers::geo::{format_distance, Location},
    traits::{AccountManagement, AuthManagement, CatalogManagement, OrderFlowDatabase},
    AccountApi,
    AuthApi,
    CatalogApi,
    OrderFlowApi,
};
use log::*;

use crate::{
    auth::{AuthenticatedUser, TokenIssuer},
    config::ServerOptions,
    data_objects::{
        AccountResponse,
        AuthResponse,
        Credentials,
        LocationAck,
        LocationReport,
        MenuResponse,
        OrderDetailResponse,
        OrderPlacedResponse,
        OrdersResponse,
        PlaceOrderRequest,
        RestaurantsResponse,
        TopUpRequest,
        TopUpResponse,
        TransactionsResponse,
    },
    errors::ServerError,
};

pub const LOCATION_LOG_TARGET: &str = "fos::location";

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal where authenticated) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: ::food_engine::traits::AuthManagement + 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name)
                    .wrap($crate::middleware::BearerAuthFactory::<A>::new());
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ident),+ where authenticated) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ ::food_engine::traits::AuthManagement + 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::BearerAuthFactory::<A>::new());
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ident),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(register => Post "/auth/register" impl AuthManagement);
/// Creates a new account with a zero balance and logs the new user straight in.
///
/// Replies `201 Created` with `{success, user, token}`. A username that is already taken is a `409 Conflict`.
pub async fn register<B: AuthManagement>(
    body: web::Json<Credentials>,
    api: web::Data<AuthApi<B>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let Credentials { username, password } = body.into_inner();
    trace!("💻️ Received registration request for '{username}'");
    let user = api.register(&username, &password).await?;
    let token = signer.issue_token(&user)?;
    Ok(HttpResponse::Created().json(AuthResponse::new(user, token)))
}

route!(login => Post "/auth/login" impl AuthManagement);
pub async fn login<B: AuthManagement>(
    body: web::Json<Credentials>,
    api: web::Data<AuthApi<B>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let Credentials { username, password } = body.into_inner();
    trace!("💻️ Received login request for '{username}'");
    let user = api.login(&username, &password).await?;
    let token = signer.issue_token(&user)?;
    Ok(HttpResponse::Ok().json(AuthResponse::new(user, token)))
}

route!(account => Get "/account" where authenticated);
/// The current user, with the balance as it is in the store right now.
pub async fn account(user: AuthenticatedUser) -> HttpResponse {
    debug!("💻️ GET account for user #{}", user.id());
    HttpResponse::Ok().json(AccountResponse { success: true, user: user.0 })
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(place_order => Post "/orders" impl OrderFlowDatabase where authenticated);
/// Places an order for the authenticated user, paid from their balance.
///
/// The order is all-or-nothing: if any line refers to an unknown or unavailable item, or the total exceeds the balance,
/// nothing is written and the balance is unchanged.
pub async fn place_order<B: OrderFlowDatabase>(
    user: AuthenticatedUser,
    body: web::Json<PlaceOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST order for user #{}", user.id());
    let receipt = api.place_order(user.id(), body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(OrderPlacedResponse::new(receipt, &options.currency_symbol)))
}

route!(my_orders => Get "/orders" impl AccountManagement where authenticated);
pub async fn my_orders<B: AccountManagement>(
    user: AuthenticatedUser,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders for user #{}", user.id());
    let orders = api.orders_for_user(user.id()).await?;
    Ok(HttpResponse::Ok().json(OrdersResponse { success: true, orders }))
}

route!(order_by_id => Get "/orders/{order_id}" impl AccountManagement where authenticated);
/// A single order with its line items. Orders belonging to someone else are reported as not found.
pub async fn order_by_id<B: AccountManagement>(
    user: AuthenticatedUser,
    path: web::Path<String>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = parse_id(&path.into_inner(), "Invalid order ID")?;
    debug!("💻️ GET order #{order_id} for user #{}", user.id());
    let detail = api
        .order_for_user(user.id(), order_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Order {order_id} not found")))?;
    Ok(HttpResponse::Ok().json(OrderDetailResponse { success: true, order: detail.order, items: detail.items }))
}

//----------------------------------------------   Catalog  ----------------------------------------------------
route!(restaurants => Get "/restaurants" impl CatalogManagement);
pub async fn restaurants<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET restaurants");
    let restaurants = api.restaurants().await?;
    Ok(HttpResponse::Ok().json(RestaurantsResponse { success: true, restaurants }))
}

route!(menu => Get "/restaurants/{restaurant_id}/menu" impl CatalogManagement);
pub async fn menu<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let restaurant_id = parse_id(&path.into_inner(), "Invalid restaurant ID")?;
    trace!("💻️ GET menu for restaurant #{restaurant_id}");
    let menu_items = api.menu_for_restaurant(restaurant_id).await?;
    Ok(HttpResponse::Ok().json(MenuResponse { success: true, menu_items }))
}

//----------------------------------------------   Wallet  ----------------------------------------------------
route!(top_up => Post "/wallet/topup" impl OrderFlowDatabase where authenticated);
pub async fn top_up<B: OrderFlowDatabase>(
    user: AuthenticatedUser,
    body: web::Json<TopUpRequest>,
    api: web::Data<OrderFlowApi<B>>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let amount = body.amount;
    debug!("💻️ POST top-up of {amount} for user #{}", user.id());
    let balance = api.top_up(user.id(), amount).await?;
    Ok(HttpResponse::Ok().json(TopUpResponse::new(amount, balance, &options.currency_symbol)))
}

route!(my_transactions => Get "/wallet/transactions" impl AccountManagement where authenticated);
pub async fn my_transactions<B: AccountManagement>(
    user: AuthenticatedUser,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET transactions for user #{}", user.id());
    let transactions = api.transactions_for_user(user.id()).await?;
    Ok(HttpResponse::Ok().json(TransactionsResponse { success: true, transactions }))
}

//----------------------------------------------   Location  ----------------------------------------------------
/// Accepts a position report from a client and logs it. Nothing is stored, and no other route depends on it.
#[post("/location")]
pub async fn report_location(body: web::Json<LocationReport>) -> impl Responder {
    let report = body.into_inner();
    let location = Location::new(report.latitude, report.longitude);
    if !location.is_valid() {
        warn!(target: LOCATION_LOG_TARGET, "📍️ Out of range coordinates reported: {location:?}");
    }
    let accuracy = report.accuracy.map(format_distance).unwrap_or_else(|| "unknown accuracy".to_string());
    info!(
        target: LOCATION_LOG_TARGET,
        "📍️ Location report: {:.6}, {:.6} (± {accuracy}) at {}",
        location.latitude,
        location.longitude,
        report.timestamp.map(|t| t.to_string()).unwrap_or_else(|| "unknown time".to_string())
    );
    HttpResponse::Ok().json(LocationAck::accepted())
}

fn parse_id(s: &str, message: &str) -> Result<i64, ServerError> {
    s.parse::<i64>().map_err(|_| ServerError::InvalidRequestPath(message.to_string()))
}
