use crate::core::{AppError, MoneyPrecision, Result};
use crate::modules::periods::{FiscalQuarter, PeriodMode, PeriodSelector};
use crate::modules::reports::ReportOptions;
use crate::modules::taxes::TaxDecomposer;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub snapshot_path: PathBuf,
    pub selector: PeriodSelector,
    pub recent_activity_limit: usize,
    pub precision: MoneyPrecision,
    pub include_booking_breakdowns: bool,
}

impl ReportConfig {
    /// Build from a variable lookup; `Config::from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode: PeriodMode = lookup("REPORT_PERIOD")
            .unwrap_or_else(|| "all".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid REPORT_PERIOD".to_string()))?;

        let year = lookup("REPORT_YEAR")
            .map(|v| v.parse::<i32>())
            .transpose()
            .map_err(|_| AppError::Configuration("Invalid REPORT_YEAR".to_string()))?;

        let month = lookup("REPORT_MONTH")
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|_| AppError::Configuration("Invalid REPORT_MONTH".to_string()))?;

        let quarter = lookup("REPORT_QUARTER")
            .map(|v| v.parse::<FiscalQuarter>())
            .transpose()
            .map_err(|_| AppError::Configuration("Invalid REPORT_QUARTER".to_string()))?;

        let base_scale = lookup("BASE_ROUNDING_SCALE")
            .unwrap_or_else(|| "0".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid BASE_ROUNDING_SCALE".to_string()))?;

        let minor_scale = lookup("MINOR_UNIT_SCALE")
            .unwrap_or_else(|| "2".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid MINOR_UNIT_SCALE".to_string()))?;

        let precision = MoneyPrecision::new(base_scale, minor_scale)
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        Ok(ReportConfig {
            snapshot_path: PathBuf::from(
                lookup("LEDGER_SNAPSHOT_PATH").unwrap_or_else(|| "ledger.json".to_string()),
            ),
            selector: PeriodSelector {
                mode,
                year,
                month,
                quarter,
            },
            recent_activity_limit: lookup("RECENT_ACTIVITY_LIMIT")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid RECENT_ACTIVITY_LIMIT".to_string())
                })?,
            precision,
            include_booking_breakdowns: lookup("INCLUDE_BOOKING_BREAKDOWNS")
                .unwrap_or_else(|| "true".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid INCLUDE_BOOKING_BREAKDOWNS".to_string())
                })?,
        })
    }

    pub fn decomposer(&self) -> TaxDecomposer {
        TaxDecomposer::with_precision(self.precision)
    }

    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            recent_activity_limit: self.recent_activity_limit,
            include_booking_breakdowns: self.include_booking_breakdowns,
        }
    }
}
