//! # Food ordering server
//! This crate hosts the HTTP server for the food ordering service. It is responsible for:
//! * Registering users and issuing access tokens.
//! * Verifying the bearer token on every authenticated request and re-reading the user from the store.
//! * Translating requests into calls on the `food_engine` APIs, and engine errors into JSON error responses.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! See [routes](routes/index.html). In brief:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/auth/register`, `/auth/login`: Account creation and login.
//! * `/account`, `/orders`, `/wallet/*`: The authenticated user's account, orders and wallet.
//! * `/restaurants`: The catalog.
//! * `/location`: The location relay.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
