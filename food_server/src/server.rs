use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
#[cfg(feature = "postgres")]
use food_engine::PostgresDatabase;
use food_engine::{
    traits::{AccountManagement, AuthManagement, CatalogManagement, OrderFlowDatabase},
    AccountApi,
    AuthApi,
    CatalogApi,
    OrderFlowApi,
    SqliteDatabase,
};
use log::*;

use crate::{
    auth::TokenIssuer,
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    helpers::prepare_sqlite_path,
    routes::{
        health,
        report_location,
        AccountRoute,
        LoginRoute,
        MenuRoute,
        MyOrdersRoute,
        MyTransactionsRoute,
        OrderByIdRoute,
        PlaceOrderRoute,
        RegisterRoute,
        RestaurantsRoute,
        TopUpRoute,
    },
};

/// Connects to the configured store, brings its schema up to date (unless `FOS_AUTO_MIGRATE` is off) and serves
/// requests until the server is stopped.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    #[cfg(feature = "postgres")]
    {
        if config.database_url.starts_with("postgres") {
            let db = PostgresDatabase::new_with_url(&config.database_url, config.max_connections)
                .await
                .map_err(|e| ServerError::InitializeError(e.to_string()))?;
            if config.auto_migrate {
                db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
            }
            return serve(config, db).await;
        }
    }
    prepare_sqlite_path(&config.database_url)?;
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.auto_migrate {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }
    serve(config, db).await
}

async fn serve<B>(config: ServerConfig, mut db: B) -> Result<(), ServerError>
where B: OrderFlowDatabase + AuthManagement + AccountManagement + CatalogManagement + Send + 'static {
    let srv = create_server_instance(config, db.clone())?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    if let Err(e) = db.close().await {
        warn!("🗃️ The database connection did not close cleanly. {e}");
    }
    result
}

pub fn create_server_instance<B>(config: ServerConfig, db: B) -> Result<Server, ServerError>
where B: OrderFlowDatabase + AuthManagement + AccountManagement + CatalogManagement + Send + 'static {
    let bind_addr = (config.host.clone(), config.port);
    let options = ServerOptions::from_config(&config);
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone());
        let auth_api = AuthApi::new(db.clone()).with_hash_cost(config.password_hash_cost);
        let accounts_api = AccountApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let jwt_signer = TokenIssuer::new(&config.auth);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("fos::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(accounts_api))
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(jwt_signer))
            .app_data(web::Data::new(options.clone()))
            .service(health)
            .service(report_location)
            .service(RegisterRoute::<B>::new())
            .service(LoginRoute::<B>::new())
            .service(AccountRoute::<B>::new())
            .service(PlaceOrderRoute::<B>::new())
            .service(MyOrdersRoute::<B>::new())
            .service(OrderByIdRoute::<B>::new())
            .service(RestaurantsRoute::<B>::new())
            .service(MenuRoute::<B>::new())
            .service(TopUpRoute::<B>::new())
            .service(MyTransactionsRoute::<B>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind(bind_addr)?
    .run();
    Ok(srv)
}

/// Malformed or mistyped JSON bodies are rejected with a 400 and a JSON `error`, like every other client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Could not deserialize request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}
