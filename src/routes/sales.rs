use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const SALES_PLACEHOLDER: &str = "Sales module under construction...";

#[derive(Serialize, ToSchema)]
pub struct SalesStatus {
    pub available: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(sales_status))
}

#[utoipa::path(
    get,
    path = "/api/sales",
    responses(
        (status = 200, description = "Placeholder for the upcoming sales module", body = ApiResponse<SalesStatus>),
    ),
    tag = "Sales"
)]
pub async fn sales_status() -> Json<ApiResponse<SalesStatus>> {
    Json(ApiResponse::success(
        SALES_PLACEHOLDER,
        SalesStatus { available: false },
        Some(Meta::empty()),
    ))
}
