//! Trip booking ledger reporting
//!
//! Aggregates client bookings and vendor expenses into period financial
//! reports with the GST on net profit split into CGST and SGST.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::bookings;
pub use modules::periods;
pub use modules::reports;
pub use modules::taxes;
