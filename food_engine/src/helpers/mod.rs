pub mod geo;
pub mod passwords;
