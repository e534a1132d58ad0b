use axum::Extension;
use axum::Json;
use chrono::Utc;

use crate::logger::Logger;
use crate::server::dtos::health_dto::{HealthResponse, HealthStatus};
use crate::server::services::app_services::AppServices;
use crate::server::{get_app_version, get_uptime_seconds};

/// nothing stateful to check, upstreams are allowed to be down. if the process answers it's
/// healthy
pub async fn health_endpoint(Extension(services): Extension<AppServices>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        timestamp: Utc::now(),
        uptime_seconds: get_uptime_seconds(),
        version: get_app_version().to_string(),
        environment: Logger::environment_name(services.config.cargo_env).to_string(),
    })
}
