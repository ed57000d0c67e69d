mod ledger_repository;

pub use ledger_repository::{
    InMemoryLedgerRepository, JsonSnapshotRepository, LedgerRepository, LedgerSnapshot,
};
