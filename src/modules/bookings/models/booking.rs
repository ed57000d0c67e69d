// Client trip booking as read from the document store.
//
// The engine never mutates bookings; it only reads the amounts and the
// calendar date. Field names follow the stored documents (camelCase, `_id`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::currency::{validate_non_negative, Money};
use crate::core::timezone::deserialize_calendar_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(alias = "_id")]
    pub id: String,

    /// Trip name, display only
    #[serde(default)]
    pub name: String,

    /// Client name, display only
    #[serde(default)]
    pub client_name: String,

    /// Total deal value agreed with the client
    pub total_client_payment: Money,

    /// Amount received from the client so far (may exceed the total)
    #[serde(default)]
    pub client_paid_amount: Money,

    /// Trip date, the fiscal anchor for bucketing
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
}

impl BookingRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        client_name: impl Into<String>,
        total_client_payment: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client_name: client_name.into(),
            total_client_payment,
            client_paid_amount: Decimal::ZERO,
            date,
        }
    }

    pub fn with_paid_amount(mut self, client_paid_amount: Money) -> Self {
        self.client_paid_amount = client_paid_amount;
        self
    }

    /// Outstanding client balance. Negative when the client overpaid.
    pub fn client_pending(&self) -> Money {
        self.total_client_payment.saturating_sub(self.client_paid_amount)
    }

    /// Rejects a booking whose deal value is negative
    pub fn validate(&self) -> Result<(), String> {
        validate_non_negative(self.total_client_payment)
            .map_err(|e| format!("totalClientPayment: {}", e))
    }
}
