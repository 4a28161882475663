//! # Energy Estimation
//!
//! Deterministic estimation of a property's monthly energy usage and its
//! normalized daily cost. Inputs come from validated request payloads, so the
//! functions here have no error paths: unknown categories fall back to the
//! documented defaults.

use crate::utils::constant::{BASELINE_CONSUMPTION_KWH, DAYS_PER_BILLING_PERIOD};

/// Rate applied when the energy source is absent or not in the table.
pub const DEFAULT_ENERGY_RATE: f64 = 0.28;

const INSULATION_FACTORS: [(&str, f64); 3] = [("poor", 1.2), ("average", 1.0), ("good", 0.8)];

/// Per-unit prices in € per kWh.
const ENERGY_RATES: [(&str, f64); 3] = [
    ("electricity", DEFAULT_ENERGY_RATE),
    ("natural_gas", 0.09),
    ("solar", 0.02),
];

fn lookup(table: &[(&str, f64)], key: &str, fallback: f64) -> f64 {
    let key = key.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map_or(fallback, |(_, value)| *value)
}

/// Multiplier for the insulation quality, matched case-insensitively.
///
/// `poor` → 1.2, `average` → 1.0, `good` → 0.8; anything else → 1.0.
pub fn insulation_factor(insulation_quality: &str) -> f64 {
    lookup(&INSULATION_FACTORS, insulation_quality, 1.0)
}

/// Price per kWh for the energy source, matched case-insensitively.
pub fn energy_rate(energy_source: Option<&str>) -> f64 {
    energy_source.map_or(DEFAULT_ENERGY_RATE, |source| {
        lookup(&ENERGY_RATES, source, DEFAULT_ENERGY_RATE)
    })
}

/// Estimated energy usage in kWh.
///
/// `square_area × 4 × insulation_factor × (1 + (current_year − year_built) / 100)`
pub fn estimate_energy_usage(
    square_area: i32,
    insulation_quality: &str,
    year_built: i32,
    current_year: i32,
) -> f64 {
    let age_factor = 1.0 + f64::from(current_year - year_built) / 100.0;
    f64::from(square_area) * BASELINE_CONSUMPTION_KWH * insulation_factor(insulation_quality) * age_factor
}

/// Daily cost in € for the given usage.
pub fn estimate_daily_cost(energy_usage: f64, energy_source: Option<&str>) -> f64 {
    energy_usage * energy_rate(energy_source) / DAYS_PER_BILLING_PERIOD
}

/// Rounds to three decimals for presentation.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn insulation_factor_is_case_insensitive() {
        assert_eq!(insulation_factor("POOR"), 1.2);
        assert_eq!(insulation_factor("Average"), 1.0);
        assert_eq!(insulation_factor("good"), 0.8);
        assert_eq!(insulation_factor(" Good "), 0.8);
    }

    #[test]
    fn unknown_insulation_uses_neutral_factor() {
        for quality in ["excellent", "", "unknown", "poorly", "GOODISH"] {
            assert_eq!(insulation_factor(quality), 1.0, "quality {quality:?}");
        }
    }

    #[test]
    fn unknown_or_missing_source_uses_electricity_rate() {
        assert_eq!(energy_rate(None), 0.28);
        assert_eq!(energy_rate(Some("wind")), 0.28);
        assert_eq!(energy_rate(Some("Electricity")), 0.28);
        assert_eq!(energy_rate(Some("NATURAL_GAS")), 0.09);
        assert_eq!(energy_rate(Some("solar")), 0.02);
    }

    #[test]
    fn usage_scales_linearly_with_area() {
        let base = estimate_energy_usage(50, "average", 1990, 2024);
        for multiple in [2, 3, 10] {
            let scaled = estimate_energy_usage(50 * multiple, "average", 1990, 2024);
            assert!((scaled - base * f64::from(multiple)).abs() < EPSILON);
        }
    }

    #[test]
    fn reference_property_estimate() {
        let usage = estimate_energy_usage(100, "good", 2000, 2024);
        assert!((usage - 396.8).abs() < EPSILON);

        let cost = estimate_daily_cost(usage, Some("solar"));
        assert!((cost - 0.264_533_333).abs() < 1e-6);
        assert_eq!(round3(cost), 0.265);
    }

    #[test]
    fn new_building_has_no_age_penalty() {
        let usage = estimate_energy_usage(10, "poor", 2024, 2024);
        assert!((usage - 48.0).abs() < EPSILON);
    }

    #[test]
    fn default_rate_cost() {
        let cost = estimate_daily_cost(300.0, None);
        assert!((cost - 2.8).abs() < EPSILON);
    }
}
