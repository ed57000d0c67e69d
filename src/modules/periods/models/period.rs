use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{AppError, Result};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How records are bucketed for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodMode {
    /// No filtering
    All,
    /// One calendar month
    Monthly,
    /// One quarter of an April-start financial year
    Quarterly,
    /// April 1 through March 31
    FinancialYear,
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodMode::All => write!(f, "all"),
            PeriodMode::Monthly => write!(f, "monthly"),
            PeriodMode::Quarterly => write!(f, "quarterly"),
            PeriodMode::FinancialYear => write!(f, "financial_year"),
        }
    }
}

impl FromStr for PeriodMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "all_time" => Ok(PeriodMode::All),
            "monthly" | "month" => Ok(PeriodMode::Monthly),
            "quarterly" | "quarter" => Ok(PeriodMode::Quarterly),
            "yearly" | "financial_year" | "fy" => Ok(PeriodMode::FinancialYear),
            _ => Err(AppError::validation(format!("Invalid period mode: {}", s))),
        }
    }
}

/// Quarter of an April-start financial year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FiscalQuarter {
    /// April - June
    Q1,
    /// July - September
    Q2,
    /// October - December
    Q3,
    /// January - March of the following calendar year
    Q4,
}

impl FiscalQuarter {
    pub const ALL: [FiscalQuarter; 4] = [
        FiscalQuarter::Q1,
        FiscalQuarter::Q2,
        FiscalQuarter::Q3,
        FiscalQuarter::Q4,
    ];

    /// Quarter a calendar date falls in
    pub fn containing(date: NaiveDate) -> Self {
        match date.month() {
            4..=6 => FiscalQuarter::Q1,
            7..=9 => FiscalQuarter::Q2,
            10..=12 => FiscalQuarter::Q3,
            _ => FiscalQuarter::Q4,
        }
    }

    /// First and last calendar month (1-based)
    pub fn months(&self) -> (u32, u32) {
        match self {
            FiscalQuarter::Q1 => (4, 6),
            FiscalQuarter::Q2 => (7, 9),
            FiscalQuarter::Q3 => (10, 12),
            FiscalQuarter::Q4 => (1, 3),
        }
    }

    /// Calendar year of the quarter relative to the financial year it belongs to
    pub fn calendar_year_offset(&self) -> i32 {
        match self {
            FiscalQuarter::Q4 => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for FiscalQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiscalQuarter::Q1 => write!(f, "Q1"),
            FiscalQuarter::Q2 => write!(f, "Q2"),
            FiscalQuarter::Q3 => write!(f, "Q3"),
            FiscalQuarter::Q4 => write!(f, "Q4"),
        }
    }
}

impl FromStr for FiscalQuarter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "Q1" => Ok(FiscalQuarter::Q1),
            "Q2" => Ok(FiscalQuarter::Q2),
            "Q3" => Ok(FiscalQuarter::Q3),
            "Q4" => Ok(FiscalQuarter::Q4),
            _ => Err(AppError::validation(format!("Invalid quarter: {}", s))),
        }
    }
}

/// Caller-built period request; fields are checked against the mode by [`PeriodSelector::validate`]
///
/// `month` is zero-indexed (0 = January, 11 = December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSelector {
    pub mode: PeriodMode,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub quarter: Option<FiscalQuarter>,
}

impl PeriodSelector {
    pub fn all() -> Self {
        Self {
            mode: PeriodMode::All,
            year: None,
            month: None,
            quarter: None,
        }
    }

    pub fn monthly(year: i32, month: u32) -> Self {
        Self {
            mode: PeriodMode::Monthly,
            year: Some(year),
            month: Some(month),
            quarter: None,
        }
    }

    pub fn quarterly(year: i32, quarter: FiscalQuarter) -> Self {
        Self {
            mode: PeriodMode::Quarterly,
            year: Some(year),
            month: None,
            quarter: Some(quarter),
        }
    }

    pub fn financial_year(year: i32) -> Self {
        Self {
            mode: PeriodMode::FinancialYear,
            year: Some(year),
            month: None,
            quarter: None,
        }
    }

    /// Checks the fields required by the mode and produces a [`Period`]
    ///
    /// Fields the mode does not use are ignored.
    pub fn validate(&self) -> Result<Period> {
        let period = match self.mode {
            PeriodMode::All => return Ok(Period::All),
            PeriodMode::Monthly => {
                let year = self.require_year()?;
                let month = self.month.ok_or_else(|| {
                    AppError::invalid_selector("month is required for monthly periods")
                })?;
                if month > 11 {
                    return Err(AppError::invalid_selector(format!(
                        "month must be between 0 and 11, got {}",
                        month
                    )));
                }
                Period::Month { year, month }
            }
            PeriodMode::Quarterly => {
                let fiscal_year = self.require_year()?;
                let quarter = self.quarter.ok_or_else(|| {
                    AppError::invalid_selector("quarter is required for quarterly periods")
                })?;
                Period::Quarter {
                    fiscal_year,
                    quarter,
                }
            }
            PeriodMode::FinancialYear => Period::FinancialYear {
                fiscal_year: self.require_year()?,
            },
        };

        if period.bounds().is_none() {
            return Err(AppError::invalid_selector(format!(
                "year {} is outside the supported calendar range",
                self.year.unwrap_or_default()
            )));
        }

        Ok(period)
    }

    fn require_year(&self) -> Result<i32> {
        self.year.ok_or_else(|| {
            AppError::invalid_selector(format!("year is required for {} periods", self.mode))
        })
    }
}

impl Default for PeriodSelector {
    fn default() -> Self {
        Self::all()
    }
}

/// A validated reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Period {
    All,
    /// Calendar month, `month` zero-indexed
    Month { year: i32, month: u32 },
    /// `fiscal_year` is the calendar year the financial year starts in
    Quarter {
        fiscal_year: i32,
        quarter: FiscalQuarter,
    },
    FinancialYear { fiscal_year: i32 },
}

impl Period {
    /// Inclusive first and last day, `None` for [`Period::All`] or years chrono cannot represent
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Period::All => None,
            Period::Month { year, month } => {
                let start = NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1)?;
                let end = start
                    .checked_add_months(chrono::Months::new(1))?
                    .pred_opt()?;
                Some((start, end))
            }
            Period::Quarter {
                fiscal_year,
                quarter,
            } => {
                let year = fiscal_year.checked_add(quarter.calendar_year_offset())?;
                let (first_month, last_month) = quarter.months();
                let start = NaiveDate::from_ymd_opt(year, first_month, 1)?;
                let end = NaiveDate::from_ymd_opt(year, last_month + 1, 1)
                    .and_then(|d| d.pred_opt())
                    .or_else(|| NaiveDate::from_ymd_opt(year, 12, 31))?;
                Some((start, end))
            }
            Period::FinancialYear { fiscal_year } => {
                let start = NaiveDate::from_ymd_opt(fiscal_year, 4, 1)?;
                let end = NaiveDate::from_ymd_opt(fiscal_year.checked_add(1)?, 3, 31)?;
                Some((start, end))
            }
        }
    }

    /// Stable label consumers use to name exports, e.g. `Q4_2023` or `FY_2023-2024`
    pub fn label(&self) -> String {
        match *self {
            Period::All => "All_Time".to_string(),
            Period::Month { year, month } => {
                let name = MONTH_ABBREVIATIONS
                    .get(month as usize)
                    .copied()
                    .unwrap_or("M??");
                format!("{}_{}", name, year)
            }
            Period::Quarter {
                fiscal_year,
                quarter,
            } => format!("{}_{}", quarter, fiscal_year),
            Period::FinancialYear { fiscal_year } => {
                format!("FY_{}-{}", fiscal_year, fiscal_year.saturating_add(1))
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
