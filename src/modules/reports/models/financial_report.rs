use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Money;
use crate::modules::bookings::BookingRecord;
use crate::modules::periods::Period;
use crate::modules::taxes::TaxBreakdown;

/// Revenue, cost and tax summary for one reporting period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialReport {
    /// Period the report covers
    pub period: Period,
    /// Sum of client deal values of bookings in the period
    pub total_revenue: Money,
    /// Sum of vendor bills attached to those bookings
    pub total_cost: Money,
    /// Revenue minus cost, negative for a loss
    pub net_profit: Money,
    /// GST decomposition of the net profit
    pub tax: TaxBreakdown,
    /// Number of bookings in the period
    pub booking_count: usize,
    /// Most recent bookings, newest first
    pub recent_activity: Vec<BookingRecord>,
    /// Per-booking lines for the service tax report, empty when disabled
    pub bookings: Vec<BookingBreakdown>,
    /// Records left out because their amounts were invalid
    pub skipped: Vec<SkippedRecord>,
}

impl FinancialReport {
    /// Report with no bookings
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            total_revenue: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            tax: TaxBreakdown::zero(),
            booking_count: 0,
            recent_activity: Vec::new(),
            bookings: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.booking_count == 0
    }

    /// Profit with GST removed
    pub fn profit_after_tax(&self) -> Money {
        self.tax.base_amount
    }

    /// Outstanding client balances across the period's bookings, saturating at the Decimal range
    pub fn total_client_pending(&self) -> Money {
        self.bookings
            .iter()
            .fold(Decimal::ZERO, |acc, b| acc.saturating_add(b.client_pending))
    }

    /// Outstanding vendor balances across the period's bookings
    pub fn total_vendor_pending(&self) -> Money {
        self.bookings
            .iter()
            .fold(Decimal::ZERO, |acc, b| acc.saturating_add(b.vendor_pending))
    }
}

/// Client and vendor position of a single booking
///
/// `client_tax` and `vendor_tax` are independent decompositions of the client
/// deal value and the vendor bills; they are never netted against each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingBreakdown {
    pub booking_id: String,
    pub trip_name: String,
    pub client_name: String,
    pub date: NaiveDate,
    pub total_client_payment: Money,
    pub client_paid: Money,
    /// Unclamped; negative when the client overpaid
    pub client_pending: Money,
    pub vendor_cost: Money,
    pub vendor_paid: Money,
    pub vendor_pending: Money,
    /// Client deal value minus vendor cost
    pub net_profit: Money,
    pub expense_count: usize,
    pub client_tax: TaxBreakdown,
    pub vendor_tax: TaxBreakdown,
    pub profit_tax: TaxBreakdown,
}

/// Amount still to be collected from a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDue {
    pub booking_id: String,
    pub client_name: String,
    /// Unclamped; negative when the client overpaid
    pub amount_due: Money,
    pub trip_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Booking,
    Expense,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Booking => write!(f, "booking"),
            RecordKind::Expense => write!(f, "expense"),
        }
    }
}

/// A malformed record excluded from aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub kind: RecordKind,
    pub id: String,
    pub reason: String,
}

impl SkippedRecord {
    pub fn new(kind: RecordKind, id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            reason: reason.into(),
        }
    }
}
