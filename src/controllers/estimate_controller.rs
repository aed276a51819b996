use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::models::estimate::{
    EstimateRequest, EstimateResponse, HealthStatus, LocationPoint, OfflineModeSetting,
    SystemConfig,
};
use crate::services::{geocoding_service, irradiance_service, solar_algorithm};
use crate::shared_state::AppState;

// ─── Boundary validation ─────────────────────────────────────────────────────

/// Rejection categories for malformed estimate requests. The estimation
/// engine itself is total; everything that can go wrong is caught here.
/// Irradiance-source failure is deliberately absent — that path degrades to
/// the internal estimate instead of erroring.
#[derive(Debug, PartialEq)]
pub enum ValidationError {
    InvalidLocation(String),
    InvalidSystemConfig(String),
}

impl ValidationError {
    fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidLocation(_) => "invalid_location",
            ValidationError::InvalidSystemConfig(_) => "invalid_system_config",
        }
    }

    fn detail(&self) -> &str {
        match self {
            ValidationError::InvalidLocation(detail)
            | ValidationError::InvalidSystemConfig(detail) => detail,
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": self.kind(), "detail": self.detail() })),
        )
            .into_response()
    }
}

fn validate_request(request: &EstimateRequest) -> Result<(), ValidationError> {
    if let Some(latitude) = request.latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::InvalidLocation(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
    }
    if let Some(longitude) = request.longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::InvalidLocation(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }
    }
    let has_coordinates = request.latitude.is_some() && request.longitude.is_some();
    if !has_coordinates && request.address.trim().is_empty() {
        return Err(ValidationError::InvalidLocation(
            "address is required when no coordinates are given".to_string(),
        ));
    }

    if !(request.system_size_kw > 0.0) {
        return Err(ValidationError::InvalidSystemConfig(
            "system_size_kw must be positive".to_string(),
        ));
    }
    if !(request.electricity_price_per_kwh > 0.0) {
        return Err(ValidationError::InvalidSystemConfig(
            "electricity_price_per_kwh must be positive".to_string(),
        ));
    }
    if request.roof_angle_deg > 60 {
        return Err(ValidationError::InvalidSystemConfig(format!(
            "roof_angle_deg {} outside [0, 60]",
            request.roof_angle_deg
        )));
    }

    Ok(())
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// POST /api/estimate
/// Run a full solar estimate
///
/// Resolves the location (explicit coordinates, geocoding API, or the built-in
/// fallback table), fetches measured irradiance when available, and runs the
/// estimation engine. External-source failures never fail the request — they
/// degrade to the internal model, and the response says which path was taken.
#[utoipa::path(
    post,
    path = "/api/estimate",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Solar generation and impact estimate", body = EstimateResponse),
        (status = 422, description = "Invalid location or system configuration")
    )
)]
pub async fn create_estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, ValidationError> {
    validate_request(&request)?;

    let offline = state.is_offline();

    // 1. Resolve the location.
    let location = match (request.latitude, request.longitude) {
        (Some(latitude), Some(longitude)) => LocationPoint {
            latitude,
            longitude,
            formatted_address: if request.address.trim().is_empty() {
                format!("{:.4}, {:.4}", latitude, longitude)
            } else {
                request.address.clone()
            },
        },
        _ if offline => geocoding_service::mock_geocode(&request.address, &state.config.geocoding),
        _ => {
            geocoding_service::geocode_address(
                state.http(),
                &state.config.geocoding,
                &request.address,
            )
            .await
        }
    };

    // 2. Measured irradiance, unless offline. A failed lookup degrades to
    //    the internal model via None.
    let measured = if offline {
        None
    } else {
        irradiance_service::fetch_monthly_ghi(
            state.http(),
            &state.config.solar_resource,
            location.latitude,
            location.longitude,
        )
        .await
    };

    let system = SystemConfig {
        system_size_kw: request.system_size_kw,
        electricity_price_per_kwh: request.electricity_price_per_kwh,
        roof_angle_deg: request.roof_angle_deg,
        orientation: request.orientation,
    };

    // 3. Pure estimation pipeline.
    let series = solar_algorithm::resolve_irradiance(location.latitude, measured);
    let generation = solar_algorithm::calculate_generation(&series, &system);
    let impact =
        solar_algorithm::calculate_impact(generation.annual_total_kwh, system.electricity_price_per_kwh);

    println!(
        "[ESTIMATE] {} | {:.1} kW {:?} @ {}° | annual {:.2} kWh ({})",
        location.formatted_address,
        system.system_size_kw,
        system.orientation,
        system.roof_angle_deg,
        generation.annual_total_kwh,
        if series.is_measured() { "measured" } else { "estimated" }
    );

    Ok(Json(EstimateResponse {
        timestamp: Utc::now(),
        average_radiation: solar_algorithm::average_radiation(&series),
        data_source: series.source_description().to_string(),
        used_measured_data: series.is_measured(),
        location,
        system,
        generation,
        impact,
    }))
}

/// GET /api/health
/// Service liveness and mode
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service status", body = HealthStatus)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        offline_mode: state.is_offline(),
    })
}

/// GET /api/settings/offline-mode
/// Read the runtime offline-mode flag
#[utoipa::path(
    get,
    path = "/api/settings/offline-mode",
    responses(
        (status = 200, description = "Current offline mode", body = OfflineModeSetting)
    )
)]
pub async fn get_offline_mode(State(state): State<AppState>) -> Json<OfflineModeSetting> {
    Json(OfflineModeSetting {
        offline_mode: state.is_offline(),
    })
}

/// POST /api/settings/offline-mode
/// Toggle the runtime offline-mode flag
///
/// When enabled, both external lookups are skipped and every estimate uses
/// the built-in fallbacks.
#[utoipa::path(
    post,
    path = "/api/settings/offline-mode",
    request_body = OfflineModeSetting,
    responses(
        (status = 200, description = "Updated offline mode", body = OfflineModeSetting)
    )
)]
pub async fn set_offline_mode(
    State(state): State<AppState>,
    Json(setting): Json<OfflineModeSetting>,
) -> Json<OfflineModeSetting> {
    state.set_offline(setting.offline_mode);
    println!("[SETTINGS] offline mode set to {}", setting.offline_mode);
    Json(OfflineModeSetting {
        offline_mode: state.is_offline(),
    })
}
