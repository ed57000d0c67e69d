use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tripledger::core::MoneyPrecision;
use tripledger::taxes::TaxDecomposer;

/// Property-based tests for GST decomposition of a tax-inclusive amount
///
/// Validates:
/// - base + cgst + sgst reconstructs the gross exactly
/// - round_off is always zero
/// - CGST and SGST differ by at most one minor unit, SGST taking the extra
/// - Inputs finer than a paisa are rounded to the nearest paisa before splitting
/// - Sign handling for losses

#[cfg(test)]
mod tax_decomposer_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_components_reconstruct_gross(paise in -100_000_000i64..100_000_000i64) {
            let gross = Decimal::new(paise, 2);
            let tax = TaxDecomposer::new().decompose(gross);

            prop_assert_eq!(tax.base_amount + tax.cgst + tax.sgst, gross);
            prop_assert_eq!(tax.round_off, Decimal::ZERO);
            prop_assert!(tax.is_reconciled());
        }

        #[test]
        fn test_sgst_takes_odd_paisa(units in -10_000_000_000i64..10_000_000_000i64, scale in 0u32..=4) {
            let tax = TaxDecomposer::new().decompose(Decimal::new(units, scale));
            let diff = tax.sgst - tax.cgst;

            prop_assert!(
                diff == Decimal::ZERO || diff == dec!(0.01),
                "sgst - cgst must be 0 or 0.01, got {}",
                diff
            );
            prop_assert!(tax.cgst.scale() <= 2);
        }

        #[test]
        fn test_sub_paisa_input_rounds_to_nearest_paisa(units in -1_000_000_000i64..1_000_000_000i64, scale in 3u32..=4) {
            let gross = Decimal::new(units, scale);
            let tax = TaxDecomposer::new().decompose(gross);

            prop_assert!((tax.gross_amount - gross).abs() <= dec!(0.005));
            prop_assert_eq!(tax.base_amount + tax.cgst + tax.sgst, tax.gross_amount);
            prop_assert_eq!(tax.round_off, Decimal::ZERO);
        }

        #[test]
        fn test_base_is_whole_rupees(rupees in 0i64..10_000_000i64) {
            let tax = TaxDecomposer::new().decompose(Decimal::from(rupees));

            prop_assert_eq!(tax.base_amount, tax.base_amount.trunc());
            prop_assert!(tax.base_amount <= Decimal::from(rupees));
        }

        #[test]
        fn test_loss_mirrors_profit_base(rupees in 1i64..10_000_000i64) {
            let decomposer = TaxDecomposer::new();
            let profit = decomposer.decompose(Decimal::from(rupees));
            let loss = decomposer.decompose(Decimal::from(-rupees));

            // Half-away-from-zero rounding keeps the base symmetric
            prop_assert_eq!(loss.base_amount, -profit.base_amount);
            prop_assert_eq!(loss.total_tax(), -profit.total_tax());
        }

        #[test]
        fn test_decompose_is_deterministic(paise in 0i64..100_000_000i64) {
            let decomposer = TaxDecomposer::new();
            let gross = Decimal::new(paise, 2);

            prop_assert_eq!(decomposer.decompose(gross), decomposer.decompose(gross));
        }
    }

    #[test]
    fn test_profit_of_20000() {
        let tax = TaxDecomposer::new().decompose(dec!(20000));

        assert_eq!(tax.base_amount, dec!(16949));
        assert_eq!(tax.cgst, dec!(1525.50));
        assert_eq!(tax.sgst, dec!(1525.50));
        assert_eq!(tax.round_off, dec!(0));
    }

    #[test]
    fn test_profit_of_100() {
        let tax = TaxDecomposer::new().decompose(dec!(100));

        assert_eq!(tax.base_amount, dec!(85));
        assert_eq!(tax.cgst, dec!(7.50));
        assert_eq!(tax.sgst, dec!(7.50));
    }

    #[test]
    fn test_odd_total_tax() {
        // 100.01 / 1.18 = 84.75 -> base 85, tax 15.01
        let decomposer = TaxDecomposer::new();

        let tax = decomposer.decompose(dec!(100.01));
        assert_eq!(tax.base_amount, dec!(85));
        assert_eq!(tax.cgst, dec!(7.50));
        assert_eq!(tax.sgst, dec!(7.51));
    }

    #[test]
    fn test_negative_odd_paisa_goes_to_sgst() {
        let tax = TaxDecomposer::new().decompose(dec!(-100.01));

        assert_eq!(tax.base_amount, dec!(-85));
        assert_eq!(tax.cgst, dec!(-7.51));
        assert_eq!(tax.sgst, dec!(-7.50));
        assert_eq!(tax.base_amount + tax.cgst + tax.sgst, dec!(-100.01));
    }

    #[test]
    fn test_zero() {
        let tax = TaxDecomposer::new().decompose(Decimal::ZERO);

        assert_eq!(tax.base_amount, Decimal::ZERO);
        assert_eq!(tax.cgst, Decimal::ZERO);
        assert_eq!(tax.sgst, Decimal::ZERO);
    }

    #[test]
    fn test_paise_base_precision() {
        let decomposer = TaxDecomposer::with_precision(MoneyPrecision::new(2, 2).unwrap());
        let tax = decomposer.decompose(dec!(100));

        // 100 / 1.18 = 84.7457... -> 84.75, tax 15.25
        assert_eq!(tax.base_amount, dec!(84.75));
        assert_eq!(tax.cgst, dec!(7.62));
        assert_eq!(tax.sgst, dec!(7.63));
    }
}
