use utoipa::OpenApi;

use crate::controllers::estimate_controller;
use crate::models::estimate;

#[derive(OpenApi)]
#[openapi(
    paths(
        estimate_controller::create_estimate,
        estimate_controller::get_health,
        estimate_controller::get_offline_mode,
        estimate_controller::set_offline_mode
    ),
    components(
        schemas(
            estimate::EstimateRequest,
            estimate::EstimateResponse,
            estimate::LocationPoint,
            estimate::SystemConfig,
            estimate::Orientation,
            estimate::MonthlyRecord,
            estimate::GenerationResult,
            estimate::ImpactResult,
            estimate::HealthStatus,
            estimate::OfflineModeSetting
        )
    ),
    tags(
        (name = "solar-estimator", description = "Solar Energy Estimation API")
    )
)]
pub struct ApiDoc;
