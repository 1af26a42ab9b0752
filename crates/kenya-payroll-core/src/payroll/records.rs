use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::deductions::{DeductionBreakdown, StatutoryRates};
use crate::money::ensure_non_negative;
use crate::types::{Money, PayPeriod};
use crate::PayrollResult;

/// Approval state of a payroll record as reported by the payroll backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayrollStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Processed,
}

impl PayrollStatus {
    /// Approved and processed records carry the backend's authoritative figures.
    pub fn is_final(self) -> bool {
        matches!(self, PayrollStatus::Approved | PayrollStatus::Processed)
    }
}

/// Deduction figures persisted by the backend for a submitted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedDeductions {
    pub nssf: Money,
    pub nhif: Money,
    pub paye: Money,
    pub housing_levy: Money,
}

/// Where a displayed breakdown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductionSource {
    /// Backend figures on an approved/processed record.
    Recorded,
    /// Computed locally from gross salary.
    Estimated,
}

/// A payroll record as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: u64,
    pub employee_id: u64,
    /// Employee display name
    pub employee: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub gross_salary: Money,
    #[serde(default)]
    pub status: PayrollStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deductions: Option<RecordedDeductions>,
}

impl PayrollRecord {
    pub fn period(&self) -> PayrollResult<PayPeriod> {
        PayPeriod::new(self.period_start, self.period_end)
    }

    /// Breakdown to display for this record.
    ///
    /// Final records with backend figures use them as-is; anything else is
    /// estimated with `rates`.
    pub fn resolve_deductions(
        &self,
        rates: &StatutoryRates,
    ) -> PayrollResult<(DeductionBreakdown, DeductionSource)> {
        match (&self.deductions, self.status.is_final()) {
            (Some(recorded), true) => {
                let gross = ensure_non_negative(self.gross_salary, "gross_salary")?;
                for (field, value) in [
                    ("deductions.nssf", recorded.nssf),
                    ("deductions.nhif", recorded.nhif),
                    ("deductions.paye", recorded.paye),
                    ("deductions.housing_levy", recorded.housing_levy),
                ] {
                    ensure_non_negative(value, field)?;
                }
                let total_deductions =
                    recorded.nssf + recorded.nhif + recorded.paye + recorded.housing_levy;
                let breakdown = DeductionBreakdown {
                    gross_salary: gross,
                    nssf: recorded.nssf,
                    nhif: recorded.nhif,
                    paye: recorded.paye,
                    housing_levy: recorded.housing_levy,
                    total_deductions,
                    net_salary: gross - total_deductions,
                };
                Ok((breakdown, DeductionSource::Recorded))
            }
            _ => Ok((rates.breakdown(self.gross_salary)?, DeductionSource::Estimated)),
        }
    }
}

/// Employee master data needed for payslips and salary reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_salary: Option<Money>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayrollError;
    use rust_decimal_macros::dec;

    fn record(status: PayrollStatus, deductions: Option<RecordedDeductions>) -> PayrollRecord {
        PayrollRecord {
            id: 7,
            employee_id: 3,
            employee: "Achieng Otieno".into(),
            period_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            gross_salary: dec!(50000),
            status,
            attendance_days: Some(22),
            payment_date: None,
            deductions,
        }
    }

    fn backend_figures() -> RecordedDeductions {
        RecordedDeductions {
            nssf: dec!(1080),
            nhif: dec!(1200),
            paye: dec!(7000),
            housing_levy: dec!(750),
        }
    }

    #[test]
    fn test_final_record_uses_recorded_figures() {
        let rec = record(PayrollStatus::Approved, Some(backend_figures()));
        let (b, source) = rec.resolve_deductions(&StatutoryRates::kenya()).unwrap();
        assert_eq!(source, DeductionSource::Recorded);
        assert_eq!(b.paye, dec!(7000));
        assert_eq!(b.total_deductions, dec!(10030));
        assert_eq!(b.net_salary, dec!(39970));
    }

    #[test]
    fn test_pending_record_is_estimated_even_with_figures() {
        let rec = record(PayrollStatus::Pending, Some(backend_figures()));
        let (b, source) = rec.resolve_deductions(&StatutoryRates::kenya()).unwrap();
        assert_eq!(source, DeductionSource::Estimated);
        assert_eq!(b.paye, dec!(7059.35));
    }

    #[test]
    fn test_final_record_without_figures_is_estimated() {
        let rec = record(PayrollStatus::Processed, None);
        let (_, source) = rec.resolve_deductions(&StatutoryRates::kenya()).unwrap();
        assert_eq!(source, DeductionSource::Estimated);
    }

    #[test]
    fn test_negative_recorded_figure_rejected() {
        let mut figures = backend_figures();
        figures.nhif = dec!(-1);
        let rec = record(PayrollStatus::Approved, Some(figures));
        let err = rec.resolve_deductions(&StatutoryRates::kenya()).unwrap_err();
        assert!(matches!(err, PayrollError::InvalidAmount { .. }));
    }

    #[test]
    fn test_record_deserializes_backend_json() {
        let json = r#"{
            "id": 12,
            "employee_id": 4,
            "employee": "Wanjiru Kamau",
            "period_start": "2025-02-01",
            "period_end": "2025-02-28",
            "gross_salary": "42000.50",
            "status": "Approved",
            "attendance_days": 20
        }"#;
        let rec: PayrollRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.gross_salary, dec!(42000.50));
        assert_eq!(rec.status, PayrollStatus::Approved);
        assert_eq!(rec.period().unwrap().days(), 28);
        assert!(rec.deductions.is_none());
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let json = r#"{
            "id": 1, "employee_id": 1, "employee": "A",
            "period_start": "2025-01-01", "period_end": "2025-01-31",
            "gross_salary": "1000"
        }"#;
        let rec: PayrollRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.status, PayrollStatus::Pending);
        assert!(!rec.status.is_final());
    }
}
