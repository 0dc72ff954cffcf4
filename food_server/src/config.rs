use std::env;

use chrono::Duration;
use food_common::{Secret, DEFAULT_CURRENCY_SYMBOL};
use food_engine::helpers::passwords::DEFAULT_HASH_COST;
use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::errors::ServerError;

const DEFAULT_FOS_HOST: &str = "127.0.0.1";
const DEFAULT_FOS_PORT: u16 = 8360;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/food_store.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 7;
const DEFAULT_CURRENCY: &str = "IDR";
const RANDOM_SECRET_LENGTH: usize = 48;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The maximum number of connections in the database pool.
    pub max_connections: u32,
    pub auth: AuthConfig,
    /// bcrypt cost for newly registered passwords.
    pub password_hash_cost: u32,
    /// ISO code of the currency that balances and prices are held in. Only used for display.
    pub currency: String,
    /// If true, the embedded migrations are run against the database before the server starts.
    pub auto_migrate: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_FOS_HOST.to_string(),
            port: DEFAULT_FOS_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            auth: AuthConfig::default(),
            password_hash_cost: DEFAULT_HASH_COST,
            currency: DEFAULT_CURRENCY.to_string(),
            auto_migrate: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("FOS_HOST").ok().unwrap_or_else(|| DEFAULT_FOS_HOST.into());
        let port = env::var("FOS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for FOS_PORT. {e} Using the default, {DEFAULT_FOS_PORT}, instead."
                    );
                    DEFAULT_FOS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_FOS_PORT);
        let database_url = env::var("FOS_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ FOS_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_connections = parse_or_default("FOS_DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            AuthConfig::default()
        });
        let password_hash_cost = parse_or_default("FOS_PASSWORD_HASH_COST", DEFAULT_HASH_COST);
        let currency = env::var("FOS_CURRENCY").ok().unwrap_or_else(|| DEFAULT_CURRENCY.into());
        let auto_migrate = env::var("FOS_AUTO_MIGRATE").map(|s| &s != "0" && &s != "false").unwrap_or(true);
        Self { host, port, database_url, max_connections, auth, password_hash_cost, currency, auto_migrate }
    }
}

fn parse_or_default<T>(var: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(s) => s.parse::<T>().unwrap_or_else(|e| {
            warn!("🪛️ Invalid configuration value for {var} ({s}). {e}. Using the default, {default}, instead.");
            default
        }),
        Err(_) => {
            debug!("🪛️ {var} is not set. Using the default value of {default}.");
            default
        },
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The shared secret used to sign and verify access tokens (HS256).
    pub jwt_secret: Secret<String>,
    /// How long an access token remains valid after it is issued.
    pub token_lifetime: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT secret has not been set. I'm using a random value for this session. DO NOT operate on \
             production like this, since every token will become invalid when the server restarts. 🚨️🚨️🚨️"
        );
        let secret = thread_rng().sample_iter(&Alphanumeric).take(RANDOM_SECRET_LENGTH).map(char::from).collect();
        Self {
            jwt_secret: Secret::new(secret),
            token_lifetime: Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS),
        }
    }
}

impl AuthConfig {
    pub fn new<S: Into<String>>(secret: S, token_lifetime: Duration) -> Self {
        Self { jwt_secret: Secret::new(secret.into()), token_lifetime }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("FOS_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [FOS_JWT_SECRET]")))?;
        if secret.trim().is_empty() {
            return Err(ServerError::ConfigurationError("FOS_JWT_SECRET is empty".to_string()));
        }
        let days = parse_or_default("FOS_TOKEN_LIFETIME_DAYS", DEFAULT_TOKEN_LIFETIME_DAYS);
        let days = if days > 0 {
            days
        } else {
            warn!("🪛️ FOS_TOKEN_LIFETIME_DAYS must be positive. Using {DEFAULT_TOKEN_LIFETIME_DAYS} days instead.");
            DEFAULT_TOKEN_LIFETIME_DAYS
        };
        Ok(Self::new(secret, Duration::days(days)))
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// The subset of the server configuration that route handlers need. It never holds secrets.
#[derive(Clone, Debug)]
pub struct ServerOptions {
    pub currency_symbol: String,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { currency_symbol: currency_symbol(&config.currency).to_string() }
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string() }
    }
}

/// Maps a handful of ISO currency codes to the symbol shown in messages. Unknown codes are shown as-is.
pub fn currency_symbol(code: &str) -> &str {
    match code.to_uppercase().as_str() {
        "IDR" => DEFAULT_CURRENCY_SYMBOL,
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "SGD" => "S$",
        _ => code,
    }
}
