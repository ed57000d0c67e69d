pub mod currency;
pub mod error;
pub mod timezone;

pub use currency::{Money, MoneyPrecision};
pub use error::{AppError, Result};
