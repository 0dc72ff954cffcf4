use crate::{
    db_types::{User, UserCredentials},
    AuthApiError,
};

/// The `AuthManagement` trait defines the credential store used for registration, login and token verification.
///
/// Password hashing happens in [`crate::AuthApi`]; backends only ever see the hash.
#[allow(async_fn_in_trait)]
pub trait AuthManagement {
    /// Creates a new user with a zero balance.
    ///
    /// Usernames are unique. If the username is already taken, [`AuthApiError::UsernameTaken`] is returned and no row
    /// is written. Backends must rely on the store's unique index for this, so that concurrent registrations of the
    /// same name cannot both succeed.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AuthApiError>;

    /// Fetches the login record for the given username. If no user exists, `None` is returned.
    async fn fetch_credentials(&self, username: &str) -> Result<Option<UserCredentials>, AuthApiError>;

    /// Fetches the current state of the user with the given id. If no user exists, `None` is returned.
    async fn fetch_user(&self, user_id: i64) -> Result<Option<User>, AuthApiError>;
}
