use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::bookings::{ExpenseRecord, LedgerRepository};
use crate::modules::periods::PeriodSelector;
use crate::modules::reports::models::{BookingBreakdown, FinancialReport, PaymentDue};
use crate::modules::reports::services::aggregator::{ghost_expenses, ReportAggregator};

/// Service for generating financial reports from the ledger
///
/// Fetches one snapshot per request and hands it to the [`ReportAggregator`].
pub struct ReportService<R: LedgerRepository> {
    ledger_repo: R,
    aggregator: ReportAggregator,
}

impl<R: LedgerRepository> ReportService<R> {
    /// Create a new report service
    pub fn new(ledger_repo: R, aggregator: ReportAggregator) -> Self {
        Self {
            ledger_repo,
            aggregator,
        }
    }

    /// Generate the financial report for a period
    ///
    /// # Arguments
    /// * `selector` - Period to report on; validated before the ledger is read
    ///
    /// # Returns
    /// FinancialReport with totals, tax split, recent activity and per-booking lines
    ///
    /// # Errors
    /// Returns `InvalidSelector` for an incomplete selector, or the repository's
    /// error if the snapshot cannot be read
    pub async fn generate_financial_report(
        &self,
        selector: &PeriodSelector,
    ) -> Result<FinancialReport> {
        let period = selector.validate()?;

        info!("Generating financial report for {}", period);

        let snapshot = self.ledger_repo.snapshot().await?;
        let report =
            self.aggregator
                .aggregate_period(&snapshot.bookings, &snapshot.expenses, &period);

        if report.is_empty() {
            warn!("Empty financial report generated for {}", period);
        } else {
            info!(
                "Financial report generated for {}: {} bookings, revenue={}, cost={}, net profit={}",
                period,
                report.booking_count,
                report.total_revenue,
                report.total_cost,
                report.net_profit
            );
        }

        if !report.skipped.is_empty() {
            warn!(
                "{} malformed records left out of the {} report",
                report.skipped.len(),
                period
            );
        }

        Ok(report)
    }

    /// Client balances outstanding for bookings in a period
    pub async fn payments_due(&self, selector: &PeriodSelector) -> Result<Vec<PaymentDue>> {
        selector.validate()?;
        let bookings = self.ledger_repo.list_bookings().await?;
        self.aggregator.payments_due(&bookings, selector)
    }

    /// Client and vendor position of one booking across all of its expenses
    ///
    /// # Errors
    /// Returns `NotFound` if no booking has the given id
    pub async fn booking_breakdown(&self, booking_id: &str) -> Result<BookingBreakdown> {
        let snapshot = self.ledger_repo.snapshot().await?;

        let booking = snapshot
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| AppError::not_found(format!("booking {}", booking_id)))?;

        Ok(self.aggregator.booking_breakdown(booking, &snapshot.expenses))
    }

    /// Expenses pointing at bookings that no longer exist
    pub async fn find_ghost_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        let snapshot = self.ledger_repo.snapshot().await?;
        let ghosts: Vec<ExpenseRecord> = ghost_expenses(&snapshot.bookings, &snapshot.expenses)
            .into_iter()
            .cloned()
            .collect();

        if ghosts.is_empty() {
            info!("Ghost expense scan complete: none found");
        } else {
            warn!("Ghost expense scan found {} orphaned expenses", ghosts.len());
        }

        Ok(ghosts)
    }
}

// Service behaviour over a real snapshot is covered in tests/integration/report_generation_test.rs
