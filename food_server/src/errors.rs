use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use food_common::Money;
use food_engine::{AccountApiError, AuthApiError, CatalogApiError, OrderFlowError};
use log::error;
use serde_json::json;
use thiserror::Error;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Invalid request body. {0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    InvalidRequestPath(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    BusinessRuleViolation(String),
    #[error("Insufficient balance")]
    InsufficientBalance { balance: Money, required: Money, shortfall: Money },
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("{0}")]
    AuthenticationError(#[from] AuthError),
    #[error("{0}")]
    NoRecordFound(String),
    #[error("{0}")]
    Conflict(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::BusinessRuleViolation(_) => StatusCode::BAD_REQUEST,
            Self::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::UnknownUser => StatusCode::UNAUTHORIZED,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::TokenCreation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            Self::InsufficientBalance { balance, required, shortfall } => json!({
                "error": self.to_string(),
                "balance": balance,
                "required": required,
                "shortfall": shortfall,
            }),
            // Store and server faults are only described in the logs.
            _ if status.is_server_error() => {
                error!("💻️ {self}");
                json!({ "error": INTERNAL_ERROR_MESSAGE })
            },
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(status).insert_header(ContentType::json()).body(body.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("User not found")]
    UnknownUser,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Could not create access token. {0}")]
    TokenCreation(String),
}

impl From<AuthApiError> for ServerError {
    fn from(e: AuthApiError) -> Self {
        match e {
            AuthApiError::ValidationError(msg) => Self::ValidationError(msg),
            AuthApiError::UsernameTaken => Self::Conflict(e.to_string()),
            AuthApiError::InvalidCredentials => Self::AuthenticationError(AuthError::InvalidCredentials),
            AuthApiError::UserNotFound(_) => Self::AuthenticationError(AuthError::UnknownUser),
            AuthApiError::DatabaseError(_) | AuthApiError::HashingError(_) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::DatabaseError(_) => Self::BackendError(e.to_string()),
            OrderFlowError::InvalidOrder(msg) => Self::ValidationError(msg),
            OrderFlowError::ItemNotFound(_) | OrderFlowError::AccountNotFound(_) => Self::NoRecordFound(e.to_string()),
            OrderFlowError::ItemUnavailable(_) | OrderFlowError::InvalidAmount(_) => {
                Self::BusinessRuleViolation(e.to_string())
            },
            OrderFlowError::InsufficientBalance { balance, required, shortfall } => {
                Self::InsufficientBalance { balance, required, shortfall }
            },
        }
    }
}

impl From<AccountApiError> for ServerError {
    fn from(e: AccountApiError) -> Self {
        Self::BackendError(e.to_string())
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        Self::BackendError(e.to_string())
    }
}
