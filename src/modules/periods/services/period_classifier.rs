use chrono::{Datelike, NaiveDate};

use crate::core::Result;
use crate::modules::periods::models::{FiscalQuarter, Period, PeriodSelector};

/// Decides which reporting bucket a record date belongs to
///
/// Financial years start on April 1. Quarter 4 of financial year `Y` is
/// January to March of calendar year `Y + 1`, regardless of the record being
/// tested. All comparisons are on calendar days.
pub struct PeriodClassifier;

impl PeriodClassifier {
    /// Financial year a date belongs to, named by the calendar year it starts in
    pub fn financial_year_of(date: NaiveDate) -> i32 {
        if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        }
    }

    /// Whether `date` falls inside `period`
    pub fn in_period(date: NaiveDate, period: &Period) -> bool {
        match *period {
            Period::All => true,
            Period::Month { year, month } => date.year() == year && date.month0() == month,
            Period::Quarter {
                fiscal_year,
                quarter,
            } => {
                Self::financial_year_of(date) == fiscal_year
                    && FiscalQuarter::containing(date) == quarter
            }
            Period::FinancialYear { fiscal_year } => Self::financial_year_of(date) == fiscal_year,
        }
    }

    /// Validates `selector` first, then classifies
    ///
    /// # Errors
    /// Returns `AppError::InvalidSelector` when the selector lacks a field its mode needs
    pub fn in_selected_period(date: NaiveDate, selector: &PeriodSelector) -> Result<bool> {
        let period = selector.validate()?;
        Ok(Self::in_period(date, &period))
    }
}
