use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::Result;
use crate::modules::bookings::models::{BookingRecord, ExpenseRecord};

/// Read-only copy of every booking and expense, taken once per report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

impl LedgerSnapshot {
    pub fn new(bookings: Vec<BookingRecord>, expenses: Vec<ExpenseRecord>) -> Self {
        Self { bookings, expenses }
    }
}

/// Source of booking and expense records
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// All bookings, in store order
    async fn list_bookings(&self) -> Result<Vec<BookingRecord>>;

    /// All expenses, including ones whose booking was deleted
    async fn list_expenses(&self) -> Result<Vec<ExpenseRecord>>;

    /// Bookings and expenses together
    async fn snapshot(&self) -> Result<LedgerSnapshot> {
        let bookings = self.list_bookings().await?;
        let expenses = self.list_expenses().await?;
        Ok(LedgerSnapshot::new(bookings, expenses))
    }
}

/// Repository over records already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerRepository {
    snapshot: LedgerSnapshot,
}

impl InMemoryLedgerRepository {
    pub fn new(bookings: Vec<BookingRecord>, expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            snapshot: LedgerSnapshot::new(bookings, expenses),
        }
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn list_bookings(&self) -> Result<Vec<BookingRecord>> {
        Ok(self.snapshot.bookings.clone())
    }

    async fn list_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        Ok(self.snapshot.expenses.clone())
    }

    async fn snapshot(&self) -> Result<LedgerSnapshot> {
        Ok(self.snapshot.clone())
    }
}

/// Repository reading a JSON export of the document store
///
/// The file holds `{"bookings": [...], "expenses": [...]}` and is re-read on
/// every call so a fresh export is picked up without restarting.
#[derive(Debug, Clone)]
pub struct JsonSnapshotRepository {
    path: PathBuf,
}

impl JsonSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<LedgerSnapshot> {
        debug!("Reading ledger snapshot from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&raw)?;

        info!(
            "Loaded ledger snapshot: {} bookings, {} expenses",
            snapshot.bookings.len(),
            snapshot.expenses.len()
        );

        Ok(snapshot)
    }
}

#[async_trait]
impl LedgerRepository for JsonSnapshotRepository {
    async fn list_bookings(&self) -> Result<Vec<BookingRecord>> {
        Ok(self.load().await?.bookings)
    }

    async fn list_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        Ok(self.load().await?.expenses)
    }

    async fn snapshot(&self) -> Result<LedgerSnapshot> {
        self.load().await
    }
}
