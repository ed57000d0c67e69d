pub mod models;
pub mod services;

pub use models::{FiscalQuarter, Period, PeriodMode, PeriodSelector};
pub use services::PeriodClassifier;
