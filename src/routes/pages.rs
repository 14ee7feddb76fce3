use axum::{
    Router,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
};

use crate::{
    dto::intake::IntakeForm,
    pages::{Page, Section, render_page},
    response::Notice,
    routes::{form::read_intake_form, params::SearchQuery},
    services::{catalog_service, intake_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/products/new", post(submit_product_form))
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let catalog = catalog_service::load_catalog(&state, query.text()).await;
    Html(render_page(&Page {
        active: Section::Inventory,
        catalog: &catalog,
        form: &IntakeForm::default(),
        notices: &[],
    }))
}

/// Handle the "New Product" form. The response is the whole page again, with
/// the inventory fetched after the insert so the new product shows up.
pub async fn submit_product_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let (status, form, notices) = match read_intake_form(multipart).await {
        Err(err) => (
            err.status(),
            IntakeForm::default(),
            vec![Notice::error(err.to_string())],
        ),
        Ok(form) => match intake_service::submit_product(&state, form).await {
            Ok(submitted) => (StatusCode::OK, IntakeForm::default(), submitted.notices),
            Err(rejected) => (rejected.error.status(), rejected.form, rejected.notices),
        },
    };

    let catalog = catalog_service::load_catalog(&state, "").await;
    let html = render_page(&Page {
        active: Section::NewProduct,
        catalog: &catalog,
        form: &form,
        notices: &notices,
    });
    (status, Html(html))
}
