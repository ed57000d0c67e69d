// Vendor bill attached to a booking.
//
// `booking_id` may point at a booking that no longer exists (a ghost
// expense); callers decide what to do with those, the record itself does
// not know.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::currency::{validate_non_negative, Money};
use crate::core::timezone::deserialize_calendar_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(alias = "_id")]
    pub id: String,

    /// Booking this bill belongs to
    pub booking_id: String,

    /// e.g. "Indigo Airlines"
    #[serde(default)]
    pub vendor_name: String,

    /// Vendor's total bill
    pub amount: Money,

    /// Paid to the vendor so far
    #[serde(default)]
    pub paid_amount: Money,

    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
}

impl ExpenseRecord {
    pub fn new(
        id: impl Into<String>,
        booking_id: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            booking_id: booking_id.into(),
            vendor_name: String::new(),
            amount,
            paid_amount: Decimal::ZERO,
            date,
        }
    }

    pub fn with_vendor(mut self, vendor_name: impl Into<String>) -> Self {
        self.vendor_name = vendor_name.into();
        self
    }

    pub fn with_paid_amount(mut self, paid_amount: Money) -> Self {
        self.paid_amount = paid_amount;
        self
    }

    pub fn vendor_pending(&self) -> Money {
        self.amount.saturating_sub(self.paid_amount)
    }

    /// Rejects a bill whose total is negative
    pub fn validate(&self) -> Result<(), String> {
        validate_non_negative(self.amount).map_err(|e| format!("amount: {}", e))
    }
}
