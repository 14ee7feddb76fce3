use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::{
        catalog::ProductList,
        intake::{IntakeUpload, SubmissionData},
    },
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::{form::read_intake_form, params::SearchQuery},
    services::{catalog_service, intake_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_products).post(create_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Products whose name matches the query, in store order", body = ApiResponse<ProductList>),
        (status = 502, description = "Store unavailable"),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let items = catalog_service::list_products(&state, query.text()).await?;
    let meta = Meta::new(items.len() as i64, state.events.revision());
    Ok(Json(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body(content = IntakeUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<SubmissionData>),
        (status = 400, description = "Invalid form values"),
        (status = 413, description = "Upload larger than the body limit"),
        (status = 502, description = "Store rejected the insert; `data.notices` holds earlier warnings"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = read_intake_form(multipart).await?;
    let response = match intake_service::submit_product(&state, form).await {
        Ok(submitted) => {
            let revision = submitted.event.revision;
            let body = ApiResponse::success(
                intake_service::PRODUCT_SAVED_MESSAGE,
                SubmissionData::from(submitted),
                Some(Meta {
                    total: None,
                    revision: Some(revision),
                }),
            );
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(rejected) => rejected.error.into_response_with(rejected.notices),
    };
    Ok(response)
}
