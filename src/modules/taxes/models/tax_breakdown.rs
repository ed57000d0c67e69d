use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Money;

/// Split of a tax-inclusive amount into its base and GST components
///
/// `base_amount + cgst + sgst + round_off == gross_amount` always holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Tax-inclusive input
    pub gross_amount: Money,
    /// Tax-exclusive base ("profit after tax" when the input is profit)
    pub base_amount: Money,
    /// Central GST half
    pub cgst: Money,
    /// State GST half, receives the odd minor unit
    pub sgst: Money,
    /// Residual keeping the parts equal to the gross
    pub round_off: Money,
}

impl TaxBreakdown {
    /// Breakdown of a zero amount
    pub fn zero() -> Self {
        Self {
            gross_amount: Decimal::ZERO,
            base_amount: Decimal::ZERO,
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            round_off: Decimal::ZERO,
        }
    }

    /// CGST + SGST
    pub fn total_tax(&self) -> Money {
        self.cgst + self.sgst
    }

    /// Whether the components add back up to the gross amount
    pub fn is_reconciled(&self) -> bool {
        self.base_amount + self.cgst + self.sgst + self.round_off == self.gross_amount
    }
}

impl Default for TaxBreakdown {
    fn default() -> Self {
        Self::zero()
    }
}
