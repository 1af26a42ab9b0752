use kenya_payroll_core::deductions::StatutoryRates;

use crate::input;

/// Statutory schedule for this run: the `--rates` file if given, else the gazetted default.
pub fn load_rates(path: Option<&str>) -> Result<StatutoryRates, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(StatutoryRates::kenya());
    };

    let rates: StatutoryRates = input::file::read_structured(path)?;
    rates
        .validate()
        .map_err(|e| format!("Invalid statutory schedule in '{path}': {e}"))?;
    tracing::info!(
        path,
        paye_bands = rates.paye_bands.len(),
        nhif_bands = rates.nhif_bands.len(),
        "using statutory schedule override"
    );
    Ok(rates)
}
