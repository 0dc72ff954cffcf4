//! bcrypt hashing, run on tokio's blocking pool so that a slow hash never stalls the async workers.

use tokio::task;

use crate::AuthApiError;

pub const DEFAULT_HASH_COST: u32 = 10;

pub async fn hash_password(password: &str, cost: u32) -> Result<String, AuthApiError> {
    let password = password.to_string();
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthApiError::HashingError(e.to_string()))?
        .map_err(|e| AuthApiError::HashingError(e.to_string()))
}

/// Checks a password against a stored hash. A malformed hash is an error, not a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthApiError> {
    let password = password.to_string();
    let hash = hash.to_string();
    task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthApiError::HashingError(e.to_string()))?
        .map_err(|e| AuthApiError::HashingError(e.to_string()))
}
