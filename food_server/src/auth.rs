//! Access tokens.
//!
//! Tokens are HS256-signed JWTs carrying the user's id and username. They are trusted for identity only: every
//! authenticated request re-reads the user from the store (see [`crate::middleware::BearerAuthFactory`]), so the
//! balance a handler sees is always the current one.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::HeaderMap, FromRequest, HttpMessage, HttpRequest};
use chrono::Duration;
use food_engine::db_types::User;
use jwt_compact::{
    alg::{Hs256, Hs256Key},
    AlgorithmExt,
    Claims,
    Header,
    TimeOptions,
    Token,
    UntrustedToken,
};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for JwtClaims {
    fn from(user: &User) -> Self {
        Self { user_id: user.id, username: user.username.clone() }
    }
}

pub struct TokenIssuer {
    key: Hs256Key,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let key = Hs256Key::new(config.jwt_secret.reveal().as_bytes());
        Self { key, lifetime: config.token_lifetime }
    }

    /// Issues a new access token for the given user, valid for the configured lifetime.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let claims =
            Claims::new(JwtClaims::from(user)).set_duration_and_issuance(&TimeOptions::default(), self.lifetime);
        let header = Header::empty().with_token_type("JWT");
        let token = Hs256.token(&header, &claims, &self.key).map_err(|e| AuthError::TokenCreation(e.to_string()))?;
        trace!("🔑️ Issued access token for user #{}", user.id);
        Ok(token)
    }

    /// Checks the token's format, signature and expiry, and returns its claims.
    ///
    /// The claims only say who the token was issued to. Callers must still confirm that the user exists.
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let untrusted = UntrustedToken::new(token).map_err(|e| {
            debug!("🔑️ Access token is not in the correct format. {e}");
            AuthError::InvalidToken
        })?;
        let token: Token<JwtClaims> = Hs256.validator(&self.key).validate(&untrusted).map_err(|e| {
            debug!("🔑️ Access token failed validation. {e}");
            AuthError::InvalidToken
        })?;
        token.claims().validate_expiration(&TimeOptions::default()).map_err(|e| {
            debug!("🔑️ Access token has expired. {e}");
            AuthError::InvalidToken
        })?;
        Ok(token.claims().custom.clone())
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(actix_web::http::header::AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;
    match value.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MissingToken),
    }
}

/// The user behind a verified access token, as re-read from the store when the request arrived.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        if user.is_none() {
            warn!("💻️ {} was routed without the bearer auth middleware", req.path());
        }
        ready(user.ok_or(ServerError::AuthenticationError(AuthError::MissingToken)))
    }
}
