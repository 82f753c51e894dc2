use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct RootStatus {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses(
        (status = 200, description = "The server is running", body = RootStatus)
    )
)]
pub async fn root() -> Json<RootStatus> {
    Json(RootStatus {
        status: "✅ Server is running".to_owned(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "API is healthy and ready to accept traffic", body = String),
        (status = 503, description = "API is not healthy, likely due to a database issue.")
    )
)]
pub async fn health_check(State(context): State<ApiContext>) -> Result<&'static str, StatusCode> {
    match context.store.ping().await {
        Ok(()) => Ok("OK"),
        Err(e) => {
            error!("Health check failed: movie store unreachable: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
