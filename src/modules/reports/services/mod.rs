mod aggregator;
mod report_service;

pub use aggregator::{ghost_expenses, ReportAggregator, ReportOptions};
pub use report_service::ReportService;
