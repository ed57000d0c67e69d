mod financial_report;

pub use financial_report::{
    BookingBreakdown, FinancialReport, PaymentDue, RecordKind, SkippedRecord,
};
