use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Monetary amount. Always fixed-point, never binary floating point.
pub type Money = Decimal;

/// Rounding rules for rupee amounts
///
/// - `base_scale`: decimal places the tax-exclusive base is rounded to (0 = whole rupees)
/// - `minor_scale`: decimal places of the smallest unit tax components are split at (2 = paise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyPrecision {
    pub base_scale: u32,
    pub minor_scale: u32,
}

impl MoneyPrecision {
    /// Largest minor scale accepted from configuration
    pub const MAX_SCALE: u32 = 4;

    pub fn new(base_scale: u32, minor_scale: u32) -> Result<Self> {
        if minor_scale > Self::MAX_SCALE {
            return Err(AppError::validation(format!(
                "minor unit scale must be at most {}, got {}",
                Self::MAX_SCALE,
                minor_scale
            )));
        }

        if base_scale > minor_scale {
            return Err(AppError::validation(format!(
                "base rounding scale ({}) cannot be finer than the minor unit scale ({})",
                base_scale, minor_scale
            )));
        }

        Ok(Self {
            base_scale,
            minor_scale,
        })
    }

    /// Rounds to the base unit, half away from zero
    ///
    /// 84.5 -> 85 and -84.5 -> -85 at scale 0.
    pub fn round_base(&self, amount: Money) -> Money {
        amount.round_dp_with_strategy(self.base_scale, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Truncates toward negative infinity at the minor unit
    pub fn floor_minor(&self, amount: Money) -> Money {
        amount.round_dp_with_strategy(self.minor_scale, RoundingStrategy::ToNegativeInfinity)
    }

    /// Rounds to the minor unit, half away from zero
    pub fn round_minor(&self, amount: Money) -> Money {
        amount.round_dp_with_strategy(self.minor_scale, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Rejects amounts finer than the minor unit, e.g. 100.019 at paise precision
    pub fn check_minor_unit(&self, amount: Money) -> std::result::Result<(), String> {
        if amount.normalize().scale() > self.minor_scale {
            return Err(format!(
                "amount has more than {} decimal places, got {}",
                self.minor_scale, amount
            ));
        }
        Ok(())
    }

    /// Returns the smallest unit (0.01 for paise)
    pub fn minor_unit(&self) -> Money {
        Decimal::new(1, self.minor_scale)
    }
}

impl Default for MoneyPrecision {
    /// Whole-rupee base, paise-level tax split
    fn default() -> Self {
        Self {
            base_scale: 0,
            minor_scale: 2,
        }
    }
}

/// Checks an amount that must not be negative (booking totals, vendor bills)
pub fn validate_non_negative(amount: Money) -> std::result::Result<(), String> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(format!("amount cannot be negative, got {}", amount));
    }
    Ok(())
}
