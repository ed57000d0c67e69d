pub mod models;
pub mod services;

pub use models::TaxBreakdown;
pub use services::{TaxDecomposer, GST_RATE};
