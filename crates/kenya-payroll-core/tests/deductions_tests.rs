use kenya_payroll_core::deductions::{
    compute_deductions, compute_deductions_f64, compute_housing_levy, compute_nhif, compute_nssf,
    compute_paye, DeductionBreakdown, StatutoryRates,
};
use kenya_payroll_core::money::{format_amount, format_kes};
use kenya_payroll_core::PayrollError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Worked payslips
// ===========================================================================

#[test]
fn test_low_salary_paye_offset_by_relief() {
    let b = compute_deductions(dec!(5000)).unwrap();
    assert_eq!(
        b,
        DeductionBreakdown {
            gross_salary: dec!(5000),
            nssf: dec!(300),
            nhif: dec!(150),
            paye: dec!(0),
            housing_levy: dec!(75),
            total_deductions: dec!(525),
            net_salary: dec!(4475),
        }
    );
}

#[test]
fn test_mid_salary_top_band() {
    let b = compute_deductions(dec!(50000)).unwrap();
    // NSSF capped: 50,000 * 0.06 = 3,000 > 1,080
    assert_eq!(b.nssf, dec!(1080));
    // 50,000 sits in the 49,999 < x <= 59,999 band
    assert_eq!(b.nhif, dec!(1200));
    // taxable 48,920: 4,483.25 + 16,587 * 0.30 = 9,459.35, less relief 2,400
    assert_eq!(b.paye, dec!(7059.35));
    assert_eq!(b.housing_levy, dec!(750));
    assert_eq!(b.total_deductions, dec!(10089.35));
    assert_eq!(b.net_salary, dec!(39910.65));
}

#[test]
fn test_zero_salary_all_zero() {
    let b = compute_deductions(Decimal::ZERO).unwrap();
    for v in [
        b.nssf,
        b.nhif,
        b.paye,
        b.housing_levy,
        b.total_deductions,
        b.net_salary,
    ] {
        assert!(v.is_zero());
    }
    assert_eq!(format_amount(b.net_salary), "0.00");
}

#[test]
fn test_high_salary_open_ended_bands() {
    let b = compute_deductions(dec!(200000)).unwrap();
    assert_eq!(b.nhif, dec!(1700));
    assert_eq!(b.nssf, dec!(1080));
    // taxable 198,920: 4,483.25 + 166,587 * 0.30 = 54,459.35 - 2,400
    assert_eq!(b.paye, dec!(52059.35));
    assert_eq!(b.housing_levy, dec!(3000));
}

#[test]
fn test_negative_salary_invalid_amount() {
    let err = compute_deductions(dec!(-500)).unwrap_err();
    assert!(matches!(err, PayrollError::InvalidAmount { .. }));
}

#[test]
fn test_non_finite_salary_invalid_amount() {
    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        let err = compute_deductions_f64(bad).unwrap_err();
        assert!(
            matches!(err, PayrollError::InvalidAmount { .. }),
            "expected InvalidAmount for {bad}"
        );
    }
}

#[test]
fn test_sub_cent_amounts_stay_exact() {
    // 0.1 + 0.2 style drift would show up here with binary floats
    let b = compute_deductions(dec!(33333.33)).unwrap();
    assert_eq!(
        b.total_deductions,
        b.nssf + b.nhif + b.paye + b.housing_levy
    );
    assert_eq!(b.housing_levy, dec!(499.99995));
    assert_eq!(format_amount(b.housing_levy), "500.00");
}

#[test]
fn test_large_salary_never_fails() {
    let b = compute_deductions(dec!(1_000_000_000)).unwrap();
    assert_eq!(b.nhif, dec!(1700));
    assert!(b.net_salary > Decimal::ZERO);
}

#[test]
fn test_presentation_format() {
    let b = compute_deductions(dec!(50000)).unwrap();
    assert_eq!(format_kes(b.net_salary), "KES 39,910.65");
    assert_eq!(format_kes(b.total_deductions), "KES 10,089.35");
}

#[test]
fn test_free_functions_match_breakdown() {
    let gross = dec!(64321.5);
    let b = compute_deductions(gross).unwrap();
    assert_eq!(compute_nssf(gross).unwrap(), b.nssf);
    assert_eq!(compute_nhif(gross).unwrap(), b.nhif);
    assert_eq!(compute_paye(gross).unwrap(), b.paye);
    assert_eq!(compute_housing_levy(gross).unwrap(), b.housing_levy);
}

#[test]
fn test_nhif_every_band_edge() {
    let edges = [
        (dec!(5999), dec!(150)),
        (dec!(7999), dec!(300)),
        (dec!(11999), dec!(400)),
        (dec!(14999), dec!(500)),
        (dec!(19999), dec!(600)),
        (dec!(24999), dec!(750)),
        (dec!(29999), dec!(850)),
        (dec!(34999), dec!(900)),
        (dec!(39999), dec!(950)),
        (dec!(44999), dec!(1000)),
        (dec!(49999), dec!(1100)),
        (dec!(59999), dec!(1200)),
        (dec!(69999), dec!(1300)),
        (dec!(79999), dec!(1400)),
        (dec!(89999), dec!(1500)),
        (dec!(99999), dec!(1600)),
    ];
    for (i, (edge, fee)) in edges.iter().enumerate() {
        assert_eq!(compute_nhif(*edge).unwrap(), *fee, "at {edge}");
        let next_fee = edges.get(i + 1).map_or(dec!(1700), |(_, f)| *f);
        assert_eq!(compute_nhif(*edge + Decimal::ONE).unwrap(), next_fee, "above {edge}");
    }
}

#[test]
fn test_paye_band_boundaries_continuous() {
    let rates = StatutoryRates::kenya();
    // gross where taxable == 24,000 exactly (NSSF capped above 18,000)
    let at_first_edge = rates.paye(dec!(25080)).unwrap();
    assert_eq!(at_first_edge, Decimal::ZERO);
    // taxable == 32,333: base tax 4,483.25 less relief
    let at_second_edge = rates.paye(dec!(33413)).unwrap();
    assert_eq!(at_second_edge, dec!(2083.25));
}

// ===========================================================================
// Properties
// ===========================================================================

fn gross_strategy() -> impl Strategy<Value = Decimal> {
    // 0.00 .. 10,000,000.00 in cents
    (0i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn prop_total_is_exact_sum(gross in gross_strategy()) {
        let b = compute_deductions(gross).unwrap();
        prop_assert_eq!(b.total_deductions, b.nssf + b.nhif + b.paye + b.housing_levy);
    }

    #[test]
    fn prop_net_is_gross_minus_total(gross in gross_strategy()) {
        let b = compute_deductions(gross).unwrap();
        prop_assert_eq!(b.net_salary, gross - b.total_deductions);
    }

    #[test]
    fn prop_paye_never_negative(gross in gross_strategy()) {
        prop_assert!(compute_paye(gross).unwrap() >= Decimal::ZERO);
    }

    #[test]
    fn prop_nssf_capped_and_proportional(gross in gross_strategy()) {
        let nssf = compute_nssf(gross).unwrap();
        prop_assert!(nssf <= dec!(1080));
        if gross * dec!(0.06) <= dec!(1080) {
            prop_assert_eq!(nssf, gross * dec!(0.06));
        }
    }

    #[test]
    fn prop_nhif_monotonic(a in gross_strategy(), b in gross_strategy()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(compute_nhif(lo).unwrap() <= compute_nhif(hi).unwrap());
    }

    #[test]
    fn prop_housing_levy_flat_rate(gross in gross_strategy()) {
        prop_assert_eq!(compute_housing_levy(gross).unwrap(), gross * dec!(0.015));
    }

    #[test]
    fn prop_negative_always_rejected(cents in 1i64..1_000_000_000) {
        let gross = Decimal::new(-cents, 2);
        let rejected = matches!(
            compute_deductions(gross),
            Err(PayrollError::InvalidAmount { .. })
        );
        prop_assert!(rejected, "negative gross {} was accepted", gross);
    }
}
