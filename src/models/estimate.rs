use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Core domain values ──────────────────────────────────────────────────────

/// Resolved geographic position for an estimate. Produced by the geocoding
/// service (or its built-in fallback table) and echoed back to the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationPoint {
    /// Degrees, positive = North (−90 … +90)
    pub latitude: f64,
    /// Degrees, positive = East (−180 … +180)
    pub longitude: f64,
    pub formatted_address: String,
}

/// Roof compass orientation. Closed set — a request carrying any other
/// string is rejected at deserialization; an omitted orientation defaults
/// to south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    North,
    East,
    #[default]
    South,
    West,
}

impl Orientation {
    /// Generation multiplier relative to an ideal south-facing roof
    /// (northern-hemisphere convention): east/west lose morning or
    /// afternoon sun, north-facing roofs perform worst.
    pub fn factor(self) -> f64 {
        match self {
            Orientation::South => 1.0,
            Orientation::East | Orientation::West => 0.85,
            Orientation::North => 0.65,
        }
    }
}

/// Panel system parameters, validated at the HTTP boundary. The estimation
/// engine assumes these are well-formed and never re-checks them.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SystemConfig {
    /// Nameplate DC capacity (kW)
    pub system_size_kw: f64,
    /// Grid price used for the savings figure
    pub electricity_price_per_kwh: f64,
    /// Roof tilt from horizontal, 0–60°
    pub roof_angle_deg: u8,
    pub orientation: Orientation,
}

/// Twelve monthly irradiance averages (kWh/m²/day, index 0 = January) with
/// their provenance: `Measured` comes from the external solar-resource API,
/// `Estimated` from the internal latitude/season model. Invariant: every
/// value is positive — the service boundary maps anything else to the
/// estimated path before the engine runs.
#[derive(Debug, Clone, PartialEq)]
pub enum IrradianceSeries {
    Measured([f64; 12]),
    Estimated([f64; 12]),
}

impl IrradianceSeries {
    pub fn values(&self) -> &[f64; 12] {
        match self {
            IrradianceSeries::Measured(v) | IrradianceSeries::Estimated(v) => v,
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, IrradianceSeries::Measured(_))
    }

    /// Provenance line surfaced to the end user alongside the figures.
    pub fn source_description(&self) -> &'static str {
        match self {
            IrradianceSeries::Measured(_) => "Solar resource API monthly averages",
            IrradianceSeries::Estimated(_) => "Modeled from latitude and time of year",
        }
    }
}

/// One calendar month of the generation forecast.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyRecord {
    /// Three-letter month label, "Jan" … "Dec"
    pub month: String,
    /// Irradiance (kWh/m²/day)
    pub radiation: f64,
    pub daily_generation_kwh: f64,
    pub monthly_generation_kwh: f64,
}

/// Full-year forecast. Recomputed on every request — never cached.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerationResult {
    pub monthly: Vec<MonthlyRecord>,
    pub annual_total_kwh: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImpactResult {
    pub co2_offset_kg: f64,
    pub annual_savings: f64,
}

// ─── REST API request/response types ─────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EstimateRequest {
    /// Free-form address or city name; geocoded unless coordinates are given.
    #[serde(default)]
    pub address: String,
    /// Explicit coordinates skip geocoding entirely (both must be present).
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub system_size_kw: f64,
    pub electricity_price_per_kwh: f64,
    #[serde(default = "default_roof_angle")]
    pub roof_angle_deg: u8,
    #[serde(default)]
    pub orientation: Orientation,
}

fn default_roof_angle() -> u8 {
    30
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EstimateResponse {
    pub timestamp: DateTime<Utc>,
    pub location: LocationPoint,
    pub system: SystemConfig,
    pub generation: GenerationResult,
    pub impact: ImpactResult,
    /// Mean of the twelve monthly irradiance values (kWh/m²/day)
    pub average_radiation: f64,
    /// Where the irradiance series came from, for display to the end user
    pub data_source: String,
    pub used_measured_data: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub offline_mode: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OfflineModeSetting {
    pub offline_mode: bool,
}

// ─── Geocoding API wire types ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: GeocodeGeometry,
    pub formatted: String,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeGeometry {
    pub lat: f64,
    pub lng: f64,
}

// ─── Solar resource API wire types ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SolarResourceResponse {
    pub outputs: SolarResourceOutputs,
}

#[derive(Debug, Deserialize)]
pub struct SolarResourceOutputs {
    pub avg_ghi: AvgGhi,
}

/// Monthly global horizontal irradiance averages, keyed "1" … "12".
#[derive(Debug, Deserialize)]
pub struct AvgGhi {
    pub monthly: HashMap<String, f64>,
}
