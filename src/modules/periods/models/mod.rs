mod period;

pub use period::{FiscalQuarter, Period, PeriodMode, PeriodSelector};
