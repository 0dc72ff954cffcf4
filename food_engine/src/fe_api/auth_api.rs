//! Registration, login and user lookup.
//!
//! Tokens are issued and verified by the server. The engine's part in token verification is [`AuthApi::fetch_user`],
//! which re-reads the user so that identity and balance always come from the store, never from the token.

use std::fmt::Debug;

use log::*;

use crate::{
    db_types::User,
    helpers::passwords::{hash_password, verify_password, DEFAULT_HASH_COST},
    traits::AuthManagement,
    AuthApiError,
};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub struct AuthApi<B> {
    db: B,
    hash_cost: u32,
}

impl<B: Debug> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.db)
    }
}

impl<B> AuthApi<B>
where B: AuthManagement
{
    pub fn new(db: B) -> Self {
        Self { db, hash_cost: DEFAULT_HASH_COST }
    }

    /// Sets the bcrypt cost used for new passwords. Existing hashes carry their own cost.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Registers a new user with a zero balance.
    ///
    /// The username is trimmed before it is checked and stored. Fails with [`AuthApiError::ValidationError`] if either
    /// field is missing or too short, and with [`AuthApiError::UsernameTaken`] if the name is already registered.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthApiError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthApiError::ValidationError("Username and password are required".into()));
        }
        if username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(AuthApiError::ValidationError(format!(
                "Username must be at least {MIN_USERNAME_LENGTH} characters"
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthApiError::ValidationError(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        let hash = hash_password(password, self.hash_cost).await?;
        let user = self.db.create_user(username, &hash).await?;
        info!("🔑️ New user registered: '{}' (#{})", user.username, user.id);
        Ok(user)
    }

    /// Checks the username and password and returns the current state of the user.
    ///
    /// An unknown username and a wrong password produce the same [`AuthApiError::InvalidCredentials`] error.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthApiError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthApiError::ValidationError("Username and password are required".into()));
        }
        let Some(creds) = self.db.fetch_credentials(username).await? else {
            debug!("🔑️ Login attempt for unknown user '{username}'");
            return Err(AuthApiError::InvalidCredentials);
        };
        if !verify_password(password, &creds.password_hash).await? {
            debug!("🔑️ Wrong password for user '{username}'");
            return Err(AuthApiError::InvalidCredentials);
        }
        let user = self.fetch_user(creds.id).await?;
        debug!("🔑️ User '{}' logged in", user.username);
        Ok(user)
    }

    /// Re-reads the user with the given id. A user that no longer exists is reported as
    /// [`AuthApiError::UserNotFound`].
    pub async fn fetch_user(&self, user_id: i64) -> Result<User, AuthApiError> {
        self.db.fetch_user(user_id).await?.ok_or(AuthApiError::UserNotFound(user_id))
    }
}
