/// Integration tests for reading ledger exports from disk
///
/// Tests the flow: JSON export -> JsonSnapshotRepository -> ReportService
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;
use tripledger::bookings::{JsonSnapshotRepository, LedgerRepository};
use tripledger::core::AppError;
use tripledger::periods::{FiscalQuarter, PeriodSelector};
use tripledger::reports::{ReportAggregator, ReportService};

/// Export in the document store's shape: camelCase fields, `_id`, ISO timestamps
const LEDGER_EXPORT: &str = r#"{
    "bookings": [
        {
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "name": "Goa Getaway",
            "clientName": "Asha Rao",
            "totalClientPayment": 50000,
            "clientPaidAmount": 30000,
            "date": "2024-01-10T00:00:00.000Z"
        },
        {
            "_id": "65a1f0c2e4b0a1b2c3d4e5f7",
            "name": "Manali Snow Trek",
            "clientName": "Vikram Shah",
            "totalClientPayment": 20000.00,
            "date": "2024-03-05"
        }
    ],
    "expenses": [
        {
            "_id": "exp-1",
            "bookingId": "65a1f0c2e4b0a1b2c3d4e5f6",
            "vendorName": "Indigo Airlines",
            "amount": 30000,
            "paidAmount": 30000,
            "date": "2024-01-02T10:15:00+05:30"
        },
        {
            "_id": "exp-2",
            "bookingId": "65a1f0c2e4b0a1b2c3d4e5f7",
            "vendorName": "Snow Valley Resort",
            "amount": 20000,
            "date": "2024-03-01"
        },
        {
            "_id": "exp-3",
            "bookingId": "deleted-booking",
            "amount": 12345,
            "date": "2024-02-01"
        }
    ]
}"#;

fn write_export(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_load_document_store_export() {
    let file = write_export(LEDGER_EXPORT);
    let repo = JsonSnapshotRepository::new(file.path());

    let snapshot = repo.snapshot().await.unwrap();

    assert_eq!(snapshot.bookings.len(), 2);
    assert_eq!(snapshot.expenses.len(), 3);

    let goa = &snapshot.bookings[0];
    assert_eq!(goa.id, "65a1f0c2e4b0a1b2c3d4e5f6");
    assert_eq!(goa.client_name, "Asha Rao");
    assert_eq!(goa.total_client_payment, dec!(50000));
    assert_eq!(goa.client_pending(), dec!(20000));
    assert_eq!(goa.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());

    // Missing paid amounts default to zero
    assert_eq!(snapshot.bookings[1].client_paid_amount, dec!(0));
    assert_eq!(snapshot.expenses[1].paid_amount, dec!(0));
    assert_eq!(snapshot.expenses[2].vendor_name, "");
}

#[tokio::test]
async fn test_report_from_export() {
    let file = write_export(LEDGER_EXPORT);
    let service = ReportService::new(
        JsonSnapshotRepository::new(file.path()),
        ReportAggregator::default(),
    );

    let report = service
        .generate_financial_report(&PeriodSelector::quarterly(2023, FiscalQuarter::Q4))
        .await
        .unwrap();

    assert_eq!(report.total_revenue, dec!(70000));
    assert_eq!(report.total_cost, dec!(50000));
    assert_eq!(report.net_profit, dec!(20000));
    assert_eq!(report.tax.base_amount, dec!(16949));
    assert_eq!(report.tax.cgst, dec!(1525.50));
    assert_eq!(report.tax.sgst, dec!(1525.50));

    let ghosts = service.find_ghost_expenses().await.unwrap();
    assert_eq!(ghosts.len(), 1);
    assert_eq!(ghosts[0].id, "exp-3");
}

#[tokio::test]
async fn test_export_is_reread_on_each_call() {
    let file = write_export(r#"{"bookings": [], "expenses": []}"#);
    let repo = JsonSnapshotRepository::new(file.path());

    assert!(repo.list_bookings().await.unwrap().is_empty());

    std::fs::write(file.path(), LEDGER_EXPORT).unwrap();

    assert_eq!(repo.list_bookings().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonSnapshotRepository::new(dir.path().join("missing.json"));

    let err = repo.snapshot().await.unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_malformed_export_is_json_error() {
    let file = write_export(r#"{"bookings": [{"_id": "b1", "date": "yesterday"}]}"#);
    let repo = JsonSnapshotRepository::new(file.path());

    let err = repo.snapshot().await.unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
}
