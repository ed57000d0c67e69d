pub mod models;
pub mod services;

pub use models::{BookingBreakdown, FinancialReport, PaymentDue, RecordKind, SkippedRecord};
pub use services::{ghost_expenses, ReportAggregator, ReportOptions, ReportService};
