//! Value types shared by the food ordering engine and server.
mod money;
mod secret;

pub use money::{Money, MoneyConversionError, DEFAULT_CURRENCY_SYMBOL};
pub use secret::Secret;
