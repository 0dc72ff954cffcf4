mod auth;

pub use auth::{BearerAuthFactory, BearerAuthService};
