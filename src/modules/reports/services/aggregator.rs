use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Money, MoneyPrecision, Result};
use crate::modules::bookings::{BookingRecord, ExpenseRecord};
use crate::modules::periods::{Period, PeriodClassifier, PeriodSelector};
use crate::modules::reports::models::{
    BookingBreakdown, FinancialReport, PaymentDue, RecordKind, SkippedRecord,
};
use crate::modules::taxes::TaxDecomposer;

/// Tunables for report generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// How many bookings `recent_activity` keeps
    pub recent_activity_limit: usize,
    /// Whether per-booking lines are computed
    pub include_booking_breakdowns: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            recent_activity_limit: 5,
            include_booking_breakdowns: true,
        }
    }
}

/// Builds period reports from a snapshot of bookings and expenses
///
/// Pure computation over borrowed input; the only failure is an invalid
/// period selector, reported before anything is summed. Malformed records
/// are skipped and listed in the report: a negative deal value or vendor
/// bill, an amount finer than the minor unit, or one that would push the
/// period total past the representable range.
/// Expenses whose booking is outside the period or missing altogether
/// contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAggregator {
    decomposer: TaxDecomposer,
    options: ReportOptions,
}

impl ReportAggregator {
    pub fn new(decomposer: TaxDecomposer, options: ReportOptions) -> Self {
        Self {
            decomposer,
            options,
        }
    }

    pub fn options(&self) -> ReportOptions {
        self.options
    }

    /// Aggregate the snapshot for the selected period
    ///
    /// # Errors
    /// Returns `AppError::InvalidSelector` when the selector lacks a field its mode needs
    pub fn aggregate(
        &self,
        bookings: &[BookingRecord],
        expenses: &[ExpenseRecord],
        selector: &PeriodSelector,
    ) -> Result<FinancialReport> {
        let period = selector.validate()?;
        Ok(self.aggregate_period(bookings, expenses, &period))
    }

    /// Aggregate the snapshot for an already validated period
    pub fn aggregate_period(
        &self,
        bookings: &[BookingRecord],
        expenses: &[ExpenseRecord],
        period: &Period,
    ) -> FinancialReport {
        let precision = self.decomposer.precision();
        let mut skipped = Vec::new();

        let mut total_revenue = Decimal::ZERO;
        let mut period_bookings: Vec<&BookingRecord> = Vec::new();
        for booking in bookings
            .iter()
            .filter(|b| PeriodClassifier::in_period(b.date, period))
        {
            if let Err(reason) = booking_problem(booking, precision) {
                skip(&mut skipped, RecordKind::Booking, &booking.id, reason);
                continue;
            }
            match total_revenue.checked_add(booking.total_client_payment) {
                Some(sum) => {
                    total_revenue = sum;
                    period_bookings.push(booking);
                }
                None => skip(
                    &mut skipped,
                    RecordKind::Booking,
                    &booking.id,
                    "totalClientPayment: period revenue would overflow".to_string(),
                ),
            }
        }

        let booking_ids: HashSet<&str> = period_bookings.iter().map(|b| b.id.as_str()).collect();

        let mut total_cost = Decimal::ZERO;
        let mut period_expenses: Vec<&ExpenseRecord> = Vec::new();
        for expense in expenses
            .iter()
            .filter(|e| booking_ids.contains(e.booking_id.as_str()))
        {
            if let Err(reason) = expense_problem(expense, precision) {
                skip(&mut skipped, RecordKind::Expense, &expense.id, reason);
                continue;
            }
            match total_cost.checked_add(expense.amount) {
                Some(sum) => {
                    total_cost = sum;
                    period_expenses.push(expense);
                }
                None => skip(
                    &mut skipped,
                    RecordKind::Expense,
                    &expense.id,
                    "amount: period cost would overflow".to_string(),
                ),
            }
        }

        // Both totals are non-negative, so the difference is representable
        let net_profit = total_revenue - total_cost;
        let tax = self.decomposer.decompose(net_profit);

        let recent_activity = most_recent(&period_bookings, self.options.recent_activity_limit);

        let breakdowns = if self.options.include_booking_breakdowns {
            let mut by_booking: HashMap<&str, Vec<&ExpenseRecord>> = HashMap::new();
            for expense in period_expenses.iter().copied() {
                by_booking
                    .entry(expense.booking_id.as_str())
                    .or_default()
                    .push(expense);
            }

            period_bookings
                .iter()
                .map(|b| {
                    let own = by_booking.get(b.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
                    self.build_breakdown(b, own)
                })
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            "Aggregated {} bookings and {} expenses for {} (revenue={}, cost={}, skipped={})",
            period_bookings.len(),
            period_expenses.len(),
            period,
            total_revenue,
            total_cost,
            skipped.len()
        );

        FinancialReport {
            period: *period,
            total_revenue,
            total_cost,
            net_profit,
            tax,
            booking_count: period_bookings.len(),
            recent_activity,
            bookings: breakdowns,
            skipped,
        }
    }

    /// Breakdown of one booking against every expense that references it
    ///
    /// Ignores periods; expenses for other bookings, malformed bills and bills
    /// that would overflow the booking's vendor cost are left out.
    pub fn booking_breakdown(
        &self,
        booking: &BookingRecord,
        expenses: &[ExpenseRecord],
    ) -> BookingBreakdown {
        let precision = self.decomposer.precision();
        let mut vendor_cost = Decimal::ZERO;
        let mut own: Vec<&ExpenseRecord> = Vec::new();

        for expense in expenses.iter().filter(|e| e.booking_id == booking.id) {
            if let Err(reason) = expense_problem(expense, precision) {
                warn!("Skipping malformed expense {}: {}", expense.id, reason);
                continue;
            }
            match vendor_cost.checked_add(expense.amount) {
                Some(sum) => {
                    vendor_cost = sum;
                    own.push(expense);
                }
                None => warn!(
                    "Skipping expense {}: vendor cost of booking {} would overflow",
                    expense.id, booking.id
                ),
            }
        }

        self.build_breakdown(booking, &own)
    }

    /// Client balances still to be collected for bookings in the selected period
    ///
    /// Lines keep the input order. Malformed bookings are logged and left out.
    pub fn payments_due(
        &self,
        bookings: &[BookingRecord],
        selector: &PeriodSelector,
    ) -> Result<Vec<PaymentDue>> {
        let period = selector.validate()?;
        let precision = self.decomposer.precision();

        Ok(bookings
            .iter()
            .filter(|b| PeriodClassifier::in_period(b.date, &period))
            .filter(|b| match booking_problem(b, precision) {
                Ok(()) => true,
                Err(reason) => {
                    warn!("Leaving malformed booking {} out of payments due: {}", b.id, reason);
                    false
                }
            })
            .map(|b| PaymentDue {
                booking_id: b.id.clone(),
                client_name: b.client_name.clone(),
                amount_due: b.client_pending(),
                trip_date: b.date,
            })
            .collect())
    }

    /// `expenses` must already be accepted and their amounts known not to overflow
    fn build_breakdown(
        &self,
        booking: &BookingRecord,
        expenses: &[&ExpenseRecord],
    ) -> BookingBreakdown {
        let vendor_cost: Money = expenses.iter().map(|e| e.amount).sum();
        let vendor_paid = expenses
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.paid_amount));
        let net_profit = booking.total_client_payment - vendor_cost;

        BookingBreakdown {
            booking_id: booking.id.clone(),
            trip_name: booking.name.clone(),
            client_name: booking.client_name.clone(),
            date: booking.date,
            total_client_payment: booking.total_client_payment,
            client_paid: booking.client_paid_amount,
            client_pending: booking.client_pending(),
            vendor_cost,
            vendor_paid,
            vendor_pending: vendor_cost.saturating_sub(vendor_paid),
            net_profit,
            expense_count: expenses.len(),
            client_tax: self.decomposer.decompose(booking.total_client_payment),
            vendor_tax: self.decomposer.decompose(vendor_cost),
            profit_tax: self.decomposer.decompose(net_profit),
        }
    }
}

/// Expenses whose booking id matches no booking in the snapshot
pub fn ghost_expenses<'a>(
    bookings: &[BookingRecord],
    expenses: &'a [ExpenseRecord],
) -> Vec<&'a ExpenseRecord> {
    let known: HashSet<&str> = bookings.iter().map(|b| b.id.as_str()).collect();
    expenses
        .iter()
        .filter(|e| !known.contains(e.booking_id.as_str()))
        .collect()
}

/// Top `limit` bookings by date, newest first; equal dates keep input order
fn most_recent(bookings: &[&BookingRecord], limit: usize) -> Vec<BookingRecord> {
    let mut sorted = bookings.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(limit).cloned().collect()
}

fn booking_problem(
    booking: &BookingRecord,
    precision: MoneyPrecision,
) -> std::result::Result<(), String> {
    booking.validate()?;
    precision
        .check_minor_unit(booking.total_client_payment)
        .map_err(|e| format!("totalClientPayment: {}", e))
}

fn expense_problem(
    expense: &ExpenseRecord,
    precision: MoneyPrecision,
) -> std::result::Result<(), String> {
    expense.validate()?;
    precision
        .check_minor_unit(expense.amount)
        .map_err(|e| format!("amount: {}", e))
}

fn skip(skipped: &mut Vec<SkippedRecord>, kind: RecordKind, id: &str, reason: String) {
    warn!("Skipping malformed {} {}: {}", kind, id, reason);
    skipped.push(SkippedRecord::new(kind, id, reason));
}
