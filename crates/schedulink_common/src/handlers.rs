// --- File: crates/schedulink_common/src/handlers.rs ---

// Liveness handlers shared by every deployment of the API.

use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "schedulink-api";
pub const API_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TestResponse {
    pub status: &'static str,
}

pub async fn root_handler() -> Json<RootResponse> {
    tracing::info!("Root endpoint accessed");
    Json(RootResponse {
        message: "Schedulink Backend API is running",
        version: API_VERSION,
    })
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is alive", body = HealthResponse)),
    tag = "Health"
))]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

pub async fn test_handler() -> Json<TestResponse> {
    tracing::info!("Test endpoint accessed");
    Json(TestResponse {
        status: "API is working",
    })
}
