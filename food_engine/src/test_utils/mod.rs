//! Helpers for integration tests and local development: throw-away SQLite databases and a small seeded catalog.
pub mod prepare_env;
pub mod seed;
