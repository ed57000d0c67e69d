use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{Money, MoneyPrecision};
use crate::modules::taxes::models::TaxBreakdown;

/// Inclusive GST rate (18%), split evenly into CGST and SGST (9% + 9%)
pub const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Splits tax-inclusive amounts into base, CGST and SGST
///
/// 1. base = round(gross / 1.18) to the base unit, half away from zero
/// 2. total tax = gross - base
/// 3. cgst = floor(total tax / 2) at the minor unit, sgst = total tax - cgst
///
/// Every part is derived from the one before it, so the parts always add back
/// to the gross and `round_off` stays zero. Works for any signed input.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxDecomposer {
    precision: MoneyPrecision,
}

impl TaxDecomposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(precision: MoneyPrecision) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> MoneyPrecision {
        self.precision
    }

    /// Decompose a tax-inclusive amount
    ///
    /// The gross is first rounded to the minor unit (half away from zero), so
    /// `gross_amount` in the result is 100.02 for an input of 100.019. The
    /// split itself then works on whole minor units only.
    pub fn decompose(&self, gross_amount: Money) -> TaxBreakdown {
        let gross_amount = self.precision.round_minor(gross_amount);

        let base_raw = gross_amount / (Decimal::ONE + GST_RATE);
        let base_amount = self.precision.round_base(base_raw);

        let total_tax = gross_amount - base_amount;
        let cgst = self.precision.floor_minor(total_tax / Decimal::TWO);
        let sgst = total_tax - cgst;

        let round_off = gross_amount - (base_amount + cgst + sgst);

        debug!(
            "Decomposed {} into base={}, cgst={}, sgst={}, round_off={}",
            gross_amount, base_amount, cgst, sgst, round_off
        );

        TaxBreakdown {
            gross_amount,
            base_amount,
            cgst,
            sgst,
            round_off,
        }
    }
}
