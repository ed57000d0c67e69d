use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use tripledger::core::AppError;
use tripledger::periods::{FiscalQuarter, Period, PeriodClassifier, PeriodMode, PeriodSelector};

/// Property-based tests for financial-year period classification
///
/// Validates:
/// - Q1..Q4 of a financial year partition that year exactly
/// - Every date lands in exactly one financial year and one month
/// - Q4 of financial year Y covers January to March of Y + 1
/// - Incomplete selectors are rejected instead of classified

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~60 years
    (0i64..22_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(days)
    })
}

#[cfg(test)]
mod period_classifier_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_quarters_partition_financial_year(date in arb_date(), fiscal_year in 1999i32..2062) {
            let in_year = PeriodClassifier::in_period(date, &Period::FinancialYear { fiscal_year });
            let matching_quarters = FiscalQuarter::ALL
                .iter()
                .filter(|q| {
                    PeriodClassifier::in_period(
                        date,
                        &Period::Quarter { fiscal_year, quarter: **q },
                    )
                })
                .count();

            if in_year {
                prop_assert_eq!(matching_quarters, 1);
            } else {
                prop_assert_eq!(matching_quarters, 0);
            }
        }

        #[test]
        fn test_date_in_exactly_one_financial_year(date in arb_date()) {
            let matches = (1998i32..2063)
                .filter(|fy| {
                    PeriodClassifier::in_period(date, &Period::FinancialYear { fiscal_year: *fy })
                })
                .count();

            prop_assert_eq!(matches, 1);
        }

        #[test]
        fn test_date_in_its_own_month(date in arb_date()) {
            let own = Period::Month { year: date.year(), month: date.month0() };
            prop_assert!(PeriodClassifier::in_period(date, &own));

            let other = Period::Month { year: date.year(), month: (date.month0() + 1) % 12 };
            prop_assert!(!PeriodClassifier::in_period(date, &other));
        }

        #[test]
        fn test_classification_agrees_with_bounds(date in arb_date(), fiscal_year in 1999i32..2062, q in 0usize..4) {
            let period = Period::Quarter { fiscal_year, quarter: FiscalQuarter::ALL[q] };
            let (start, end) = period.bounds().unwrap();

            prop_assert_eq!(
                PeriodClassifier::in_period(date, &period),
                start <= date && date <= end
            );
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_q4_is_january_to_march_of_next_year() {
        let selector = PeriodSelector::quarterly(2023, FiscalQuarter::Q4);

        assert!(PeriodClassifier::in_selected_period(ymd(2024, 2, 15), &selector).unwrap());
        assert!(!PeriodClassifier::in_selected_period(ymd(2023, 2, 15), &selector).unwrap());
        assert!(!PeriodClassifier::in_selected_period(ymd(2024, 4, 1), &selector).unwrap());
    }

    #[test]
    fn test_financial_year_edges() {
        let selector = PeriodSelector::financial_year(2023);

        assert!(PeriodClassifier::in_selected_period(ymd(2023, 4, 1), &selector).unwrap());
        assert!(PeriodClassifier::in_selected_period(ymd(2024, 3, 31), &selector).unwrap());
        assert!(!PeriodClassifier::in_selected_period(ymd(2023, 3, 31), &selector).unwrap());
        assert!(!PeriodClassifier::in_selected_period(ymd(2024, 4, 1), &selector).unwrap());
    }

    #[test]
    fn test_month_is_zero_indexed() {
        let february = PeriodSelector::monthly(2024, 1);

        assert!(PeriodClassifier::in_selected_period(ymd(2024, 2, 29), &february).unwrap());
        assert!(!PeriodClassifier::in_selected_period(ymd(2024, 1, 31), &february).unwrap());
    }

    #[test]
    fn test_incomplete_selectors_rejected() {
        let date = ymd(2024, 2, 15);
        let cases = [
            PeriodSelector { mode: PeriodMode::Monthly, year: Some(2024), month: None, quarter: None },
            PeriodSelector { mode: PeriodMode::Monthly, year: None, month: Some(1), quarter: None },
            PeriodSelector { mode: PeriodMode::Monthly, year: Some(2024), month: Some(12), quarter: None },
            PeriodSelector { mode: PeriodMode::Quarterly, year: Some(2023), month: None, quarter: None },
            PeriodSelector { mode: PeriodMode::FinancialYear, year: None, month: None, quarter: None },
        ];

        for selector in cases {
            let err = PeriodClassifier::in_selected_period(date, &selector).unwrap_err();
            assert!(matches!(err, AppError::InvalidSelector(_)), "{:?}", selector);
        }
    }

    #[test]
    fn test_all_time_ignores_extra_fields() {
        let selector = PeriodSelector {
            mode: PeriodMode::All,
            year: Some(1999),
            month: Some(40),
            quarter: None,
        };

        assert!(PeriodClassifier::in_selected_period(ymd(2024, 2, 15), &selector).unwrap());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PeriodSelector::all().validate().unwrap().label(), "All_Time");
        assert_eq!(PeriodSelector::monthly(2024, 1).validate().unwrap().label(), "Feb_2024");
        assert_eq!(
            PeriodSelector::quarterly(2023, FiscalQuarter::Q4).validate().unwrap().label(),
            "Q4_2023"
        );
        assert_eq!(
            PeriodSelector::financial_year(2023).validate().unwrap().label(),
            "FY_2023-2024"
        );
    }
}
