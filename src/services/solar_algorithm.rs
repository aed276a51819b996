/// ============================================================
///  Solar Generation & Impact Estimation Engine
///
///  Algorithm pipeline:
///   1. Irradiance resolution – measured monthly averages when the
///                              external source supplied them, otherwise
///                              a latitude × season approximation
///   2. System derating       – roof orientation and tilt multipliers
///                              applied to the nameplate capacity
///   3. Energy integration    – daily kWh × days in month, accumulated
///                              to an annual total at full precision
///   4. Impact figures        – grid-CO₂ offset and electricity savings
///
///  Every function here is pure and total: no I/O, no state, no error
///  paths. Input validity is the caller's problem.
/// ============================================================

use crate::models::estimate::{
    GenerationResult, ImpactResult, IrradianceSeries, MonthlyRecord, SystemConfig,
};

// ─── Model constants ─────────────────────────────────────────
const BASE_RADIATION: f64 = 5.0; // kWh/m²/day before latitude/season adjustment
const PANEL_EFFICIENCY: f64 = 0.75; // combined panel + inverter derate
const CO2_PER_KWH: f64 = 0.4; // kg CO₂ avoided per grid kWh displaced
const OPTIMAL_TILT_DEG: f64 = 30.0; // assumed optimum tilt, not latitude-corrected
const MIN_ANGLE_FACTOR: f64 = 0.7; // efficiency floor for any tilt in range

// Seasonal multipliers, index 0 = January. The southern table is the
// northern one phase-shifted by six months (peak Dec–Feb).
const SEASON_NORTH: [f64; 12] = [0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 1.2, 1.1, 1.0, 0.9, 0.8, 0.7];
const SEASON_SOUTH: [f64; 12] = [1.2, 1.1, 1.0, 0.9, 0.8, 0.7, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2];

// Gregorian non-leap year.
const DAYS_IN_MONTH: [f64; 12] = [
    31.0, 28.0, 31.0, 30.0, 31.0, 30.0, 31.0, 31.0, 30.0, 31.0, 30.0, 31.0,
];

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ─── 1. Irradiance resolution ────────────────────────────────

/// Choose between an externally measured monthly series and the internal
/// latitude/season model.
///
/// A `Some` is trusted as-is (the service boundary has already discarded
/// incomplete or non-positive payloads); `None` triggers the estimate.
/// Always returns a well-formed series — this is the system's only
/// irradiance fallback.
pub fn resolve_irradiance(latitude: f64, measured: Option<[f64; 12]>) -> IrradianceSeries {
    match measured {
        Some(series) => IrradianceSeries::Measured(series),
        None => {
            let mut series = [0.0; 12];
            for (month, slot) in series.iter_mut().enumerate() {
                *slot = estimate_monthly_radiation(latitude, month);
            }
            IrradianceSeries::Estimated(series)
        }
    }
}

/// Estimated irradiance (kWh/m²/day) for one month, 0-indexed from January.
/// Intensity falls off with distance from the equator; the seasonal table
/// flips phase across the hemispheres.
fn estimate_monthly_radiation(latitude: f64, month: usize) -> f64 {
    let latitude_adj = latitude.abs().to_radians().cos() * 2.0;
    let season_adj = if latitude >= 0.0 {
        SEASON_NORTH[month]
    } else {
        SEASON_SOUTH[month]
    };
    BASE_RADIATION * latitude_adj * season_adj
}

// ─── 2–3. Generation calculation ─────────────────────────────

/// Tilt efficiency: linear falloff from the assumed 30° optimum at 1 %/degree,
/// floored at 70 %.
pub fn angle_factor(roof_angle_deg: f64) -> f64 {
    (1.0 - (roof_angle_deg - OPTIMAL_TILT_DEG).abs() * 0.01).max(MIN_ANGLE_FACTOR)
}

/// Full-year generation forecast for a system under the given irradiance.
///
/// Monthly and annual magnitudes are rounded to 2 decimals only when placed
/// into the result; the annual accumulator runs at full precision so the
/// twelve roundings never compound.
pub fn calculate_generation(series: &IrradianceSeries, config: &SystemConfig) -> GenerationResult {
    let effective_kw = config.system_size_kw
        * config.orientation.factor()
        * angle_factor(config.roof_angle_deg as f64);

    let mut monthly = Vec::with_capacity(12);
    let mut annual_total = 0.0;

    for (month, &radiation) in series.values().iter().enumerate() {
        let daily = effective_kw * radiation * PANEL_EFFICIENCY;
        let total = daily * DAYS_IN_MONTH[month];
        annual_total += total;

        monthly.push(MonthlyRecord {
            month: MONTH_LABELS[month].to_string(),
            radiation: round2(radiation),
            daily_generation_kwh: round2(daily),
            monthly_generation_kwh: round2(total),
        });
    }

    GenerationResult {
        monthly,
        annual_total_kwh: round2(annual_total),
    }
}

// ─── 4. Impact calculation ───────────────────────────────────

/// CO₂ offset and electricity savings derived from the annual total.
pub fn calculate_impact(annual_total_kwh: f64, electricity_price_per_kwh: f64) -> ImpactResult {
    ImpactResult {
        co2_offset_kg: round2(annual_total_kwh * CO2_PER_KWH),
        annual_savings: round2(annual_total_kwh * electricity_price_per_kwh),
    }
}

/// Mean of the twelve monthly irradiance values, for display.
pub fn average_radiation(series: &IrradianceSeries) -> f64 {
    round2(series.values().iter().sum::<f64>() / 12.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::estimate::Orientation;

    fn config(size_kw: f64, orientation: Orientation, roof_angle_deg: u8) -> SystemConfig {
        SystemConfig {
            system_size_kw: size_kw,
            electricity_price_per_kwh: 0.15,
            roof_angle_deg,
            orientation,
        }
    }

    #[test]
    fn resolver_returns_twelve_positive_values_for_any_latitude() {
        for latitude in [-89.9, -40.0, -1.0, 0.0, 23.5, 40.7128, 89.9] {
            let series = resolve_irradiance(latitude, None);
            assert!(!series.is_measured());
            for (month, &value) in series.values().iter().enumerate() {
                assert!(
                    value > 0.0,
                    "month {} at latitude {} should be positive, got {}",
                    month,
                    latitude,
                    value
                );
            }
        }
    }

    #[test]
    fn hemispheres_use_tables_shifted_six_months() {
        let north = resolve_irradiance(40.0, None);
        let south = resolve_irradiance(-40.0, None);
        for month in 0..12 {
            let shifted = (month + 6) % 12;
            assert!(
                (north.values()[month] - south.values()[shifted]).abs() < 1e-12,
                "month {} north vs month {} south should match for equal |latitude|",
                month,
                shifted
            );
        }
    }

    #[test]
    fn measured_series_passes_through_unchanged() {
        let measured = [4.2, 4.5, 5.0, 5.5, 6.0, 6.5, 6.6, 6.2, 5.6, 5.0, 4.4, 4.0];
        let series = resolve_irradiance(40.0, Some(measured));
        assert!(series.is_measured());
        assert_eq!(series.values(), &measured);
    }

    #[test]
    fn generation_is_linear_in_system_size() {
        let series = resolve_irradiance(40.7128, None);
        let single = calculate_generation(&series, &config(5.0, Orientation::East, 20));
        let double = calculate_generation(&series, &config(10.0, Orientation::East, 20));

        for (a, b) in single.monthly.iter().zip(double.monthly.iter()) {
            assert!(
                (b.daily_generation_kwh - 2.0 * a.daily_generation_kwh).abs() < 0.02,
                "{}: daily {} vs {}",
                a.month,
                a.daily_generation_kwh,
                b.daily_generation_kwh
            );
            assert!((b.monthly_generation_kwh - 2.0 * a.monthly_generation_kwh).abs() < 0.02);
        }
        assert!((double.annual_total_kwh - 2.0 * single.annual_total_kwh).abs() < 0.02);
    }

    #[test]
    fn angle_factor_has_floor_and_peaks_at_optimum() {
        assert_eq!(angle_factor(30.0), 1.0);
        assert_eq!(angle_factor(0.0), 0.7);
        assert_eq!(angle_factor(60.0), 0.7);
        for angle in 0..=60 {
            let f = angle_factor(angle as f64);
            assert!(
                (MIN_ANGLE_FACTOR..=1.0).contains(&f),
                "angle {} gave factor {}",
                angle,
                f
            );
            assert!(f <= angle_factor(30.0));
        }
    }

    #[test]
    fn orientation_factors_are_ordered() {
        assert_eq!(Orientation::South.factor(), 1.0);
        assert_eq!(Orientation::East.factor(), 0.85);
        assert_eq!(Orientation::West.factor(), 0.85);
        assert_eq!(Orientation::North.factor(), 0.65);
        assert!(Orientation::South.factor() > Orientation::East.factor());
        assert!(Orientation::East.factor() > Orientation::North.factor());
        // An omitted orientation deserializes to the default, which must
        // carry the neutral factor.
        assert_eq!(Orientation::default().factor(), 1.0);
    }

    #[test]
    fn impact_is_linear_in_both_arguments() {
        let base = calculate_impact(1000.0, 0.15);
        assert_eq!(base.co2_offset_kg, 400.0);
        assert_eq!(base.annual_savings, 150.0);

        let double_energy = calculate_impact(2000.0, 0.15);
        assert_eq!(double_energy.co2_offset_kg, 2.0 * base.co2_offset_kg);
        assert_eq!(double_energy.annual_savings, 2.0 * base.annual_savings);

        let double_price = calculate_impact(1000.0, 0.30);
        assert_eq!(double_price.co2_offset_kg, base.co2_offset_kg);
        assert_eq!(double_price.annual_savings, 2.0 * base.annual_savings);
    }

    #[test]
    fn new_york_reference_figures() {
        // 5 kW south-facing at the 30° optimum in New York, estimated
        // irradiance, price 0.15 — the worked example for the whole model.
        let latitude = 40.7128;
        let series = resolve_irradiance(latitude, None);
        let cfg = config(5.0, Orientation::South, 30);
        let generation = calculate_generation(&series, &cfg);

        let jan = &generation.monthly[0];
        let expected_jan_radiation = BASE_RADIATION * latitude.to_radians().cos() * 2.0 * 0.7;
        assert_eq!(jan.month, "Jan");
        assert!(
            (jan.radiation - 5.31).abs() < 0.01,
            "Jan radiation ≈ 5.31, got {}",
            jan.radiation
        );
        assert!((series.values()[0] - expected_jan_radiation).abs() < 1e-12);
        assert!(
            (jan.daily_generation_kwh - 19.9).abs() < 0.05,
            "Jan daily ≈ 19.9 kWh, got {}",
            jan.daily_generation_kwh
        );
        assert!(
            (jan.monthly_generation_kwh - 617.0).abs() < 1.5,
            "Jan monthly ≈ 617 kWh, got {}",
            jan.monthly_generation_kwh
        );

        // Annual total follows from the season table and the day counts:
        // Σ season[m] · days[m] = 347 exactly.
        let expected_annual = cfg.system_size_kw
            * PANEL_EFFICIENCY
            * BASE_RADIATION
            * (latitude.to_radians().cos() * 2.0)
            * 347.0;
        assert!(
            (generation.annual_total_kwh - expected_annual).abs() < 0.01,
            "annual {} vs expected {}",
            generation.annual_total_kwh,
            expected_annual
        );

        let impact = calculate_impact(generation.annual_total_kwh, cfg.electricity_price_per_kwh);
        assert!((impact.co2_offset_kg - generation.annual_total_kwh * 0.4).abs() < 0.01);
        assert!((impact.annual_savings - generation.annual_total_kwh * 0.15).abs() < 0.01);

        println!(
            "New York 5 kW: annual={:.2} kWh co2={:.2} kg savings={:.2}",
            generation.annual_total_kwh, impact.co2_offset_kg, impact.annual_savings
        );
    }

    #[test]
    fn annual_total_accumulates_before_rounding() {
        // Radiation values whose daily figures round visibly: the annual
        // total must come from the unrounded accumulation, not from summing
        // the displayed monthly values.
        let measured = [3.333; 12];
        let series = resolve_irradiance(0.0, Some(measured));
        let generation = calculate_generation(&series, &config(1.0, Orientation::South, 30));

        let daily = 1.0 * 3.333 * PANEL_EFFICIENCY;
        let expected: f64 = DAYS_IN_MONTH.iter().map(|days| daily * days).sum();
        assert_eq!(generation.annual_total_kwh, (expected * 100.0).round() / 100.0);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let cfg = config(7.5, Orientation::West, 45);
        let first_series = resolve_irradiance(-33.87, None);
        let second_series = resolve_irradiance(-33.87, None);
        assert_eq!(first_series, second_series);

        let first = calculate_generation(&first_series, &cfg);
        let second = calculate_generation(&second_series, &cfg);
        assert_eq!(first.annual_total_kwh, second.annual_total_kwh);
        for (a, b) in first.monthly.iter().zip(second.monthly.iter()) {
            assert_eq!(a.radiation, b.radiation);
            assert_eq!(a.daily_generation_kwh, b.daily_generation_kwh);
            assert_eq!(a.monthly_generation_kwh, b.monthly_generation_kwh);
        }
    }
}
