pub mod models;
pub mod repositories;

pub use models::{BookingRecord, ExpenseRecord};
pub use repositories::{
    InMemoryLedgerRepository, JsonSnapshotRepository, LedgerRepository, LedgerSnapshot,
};
