use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: &'static str,
    /// Number of products created since the process started.
    pub catalog_revision: u64,
}

// Liveness only; the remote store is not contacted.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let revision = state.events.revision();
    Json(ApiResponse::success(
        "Health check",
        HealthData {
            status: "ok",
            catalog_revision: revision,
        },
        Some(Meta {
            total: None,
            revision: Some(revision),
        }),
    ))
}
