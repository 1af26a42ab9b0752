use kenya_payroll_core::deductions::{compute_deductions, StatutoryRates};
use kenya_payroll_core::payroll::payslip::{build_payslips, PayslipBatchInput};
use kenya_payroll_core::payroll::preview::{preview_payroll, PreviewInput};
use kenya_payroll_core::payroll::register::{build_register, export_rows};
use kenya_payroll_core::payroll::{DeductionSource, PayrollRecord};
use kenya_payroll_core::reports::statistics::{deductions_breakdown, payroll_statistics};
use kenya_payroll_core::reports::trends::monthly_trend;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures shaped like the payroll backend's JSON
// ===========================================================================

fn backend_records() -> Vec<PayrollRecord> {
    serde_json::from_str(
        r#"[
        {
            "id": 1, "employee_id": 10, "employee": "Achieng Otieno",
            "period_start": "2025-01-01", "period_end": "2025-01-31",
            "gross_salary": "50000", "status": "Approved", "attendance_days": 22,
            "payment_date": "2025-02-01",
            "deductions": { "nssf": "1080", "nhif": "1200", "paye": "7059.35", "housing_levy": "750" }
        },
        {
            "id": 2, "employee_id": 11, "employee": "Brian Kiprop",
            "period_start": "2025-01-01", "period_end": "2025-01-31",
            "gross_salary": 5000, "status": "Pending", "attendance_days": 20
        },
        {
            "id": 3, "employee_id": 10, "employee": "Achieng Otieno",
            "period_start": "2025-02-01", "period_end": "2025-02-28",
            "gross_salary": "200000", "status": "Rejected"
        }
    ]"#,
    )
    .unwrap()
}

// ===========================================================================
// Consistency across consumers
// ===========================================================================

#[test]
fn test_register_and_reports_agree_with_calculator() {
    let rates = StatutoryRates::kenya();
    let records = backend_records();

    let register = build_register(&records, &rates).unwrap();
    let stats = payroll_statistics(&records, &rates).unwrap();
    let breakdown = deductions_breakdown(&records, &rates).unwrap();

    let register_total: Decimal = register
        .result
        .iter()
        .map(|r| r.deductions.total_deductions)
        .sum();
    assert_eq!(register_total, stats.result.total_deductions);
    assert_eq!(register_total, breakdown.result.total_deductions);

    let expected: Decimal = [dec!(50000), dec!(5000), dec!(200000)]
        .iter()
        .map(|g| compute_deductions(*g).unwrap().total_deductions)
        .sum();
    assert_eq!(register_total, expected);
}

#[test]
fn test_register_sources() {
    let out = build_register(&backend_records(), &StatutoryRates::kenya()).unwrap();
    let sources: Vec<DeductionSource> = out.result.iter().map(|r| r.source).collect();
    assert_eq!(
        sources,
        vec![
            DeductionSource::Recorded,
            DeductionSource::Estimated,
            DeductionSource::Estimated
        ]
    );
}

#[test]
fn test_export_grid_is_rounded_text() {
    let out = build_register(&backend_records(), &StatutoryRates::kenya()).unwrap();
    let rows = export_rows(&out.result);
    assert_eq!(rows[0].paye, "7059.35");
    assert_eq!(rows[0].net_salary, "39910.65");
    assert_eq!(rows[1].net_salary, "4475.00");
    assert_eq!(rows[2].nhif, "1700.00");
    assert_eq!(rows[2].attendance_days, "N/A");
}

#[test]
fn test_payslip_batch_from_json() {
    let input: PayslipBatchInput = serde_json::from_value(serde_json::json!({
        "company": { "name": "ACME KENYA LTD", "hr_contact": "hr@acme.co.ke" },
        "records": backend_records(),
        "employees": [
            { "id": 10, "name": "Achieng Otieno", "department": "Finance", "position": "Accountant" }
        ]
    }))
    .unwrap();
    let out = build_payslips(&input, &StatutoryRates::kenya()).unwrap();
    assert_eq!(out.result.len(), 2);
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.result[0].payment_date, "2025-02-01");
    assert_eq!(out.result[0].company.name, "ACME KENYA LTD");
    assert_eq!(out.result[1].file_name, "Payslip_Achieng_Otieno_2025-02-28.pdf");
}

#[test]
fn test_preview_from_json() {
    let input: PreviewInput = serde_json::from_str(
        r#"{
        "period_start": "2025-03-01",
        "period_end": "2025-03-31",
        "employees": [
            { "employee_id": 1, "employee": "A", "gross_salary": "50000", "attendance_days": 21 },
            { "employee_id": 2, "employee": "B", "gross_salary": "0", "attendance_days": 0 }
        ]
    }"#,
    )
    .unwrap();
    let out = preview_payroll(&input, &StatutoryRates::kenya()).unwrap();
    assert_eq!(out.result.summary.total_net, dec!(39910.65));
    assert_eq!(out.result.summary.anomalies, 1);
}

#[test]
fn test_monthly_trend_uses_true_net() {
    let out = monthly_trend(&backend_records(), 2025, &StatutoryRates::kenya()).unwrap();
    let jan = &out.result[0];
    assert_eq!(jan.count, 2);
    assert_eq!(jan.net, dec!(39910.65) + dec!(4475));
    // not the 70% shortcut
    assert_ne!(jan.net, jan.gross * dec!(0.7));
}
