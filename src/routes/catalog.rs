use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures_util::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;

use crate::{
    dto::catalog::CatalogView,
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    services::catalog_service,
    state::AppState,
};

pub const CATALOG_CHANGED_EVENT: &str = "catalog-changed";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_catalog))
        .route("/events", get(catalog_events))
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    params(SearchQuery),
    responses(
        (status = 200, description = "Inventory grid, or the empty state when the store holds no products", body = ApiResponse<CatalogView>),
        (status = 502, description = "Store unavailable"),
    ),
    tag = "Catalog"
)]
pub async fn get_catalog(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<CatalogView>>> {
    let view = catalog_service::load_catalog(&state, query.text()).await?;
    let total = match &view {
        CatalogView::Empty { .. } => 0,
        CatalogView::Grid { matches, .. } => *matches as i64,
    };
    let meta = Meta::new(total, state.events.revision());
    Ok(Json(ApiResponse::success("Catalog", view, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/catalog/events",
    responses(
        (status = 200, description = "Server-sent `catalog-changed` events carrying the new revision"),
    ),
    tag = "Catalog"
)]
pub async fn catalog_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.events.subscribe();
    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(change) => {
                    let event = Event::default()
                        .event(CATALOG_CHANGED_EVENT)
                        .data(change.revision.to_string());
                    return Some((Ok::<_, Infallible>(event), receiver));
                }
                // A lagging view only needs to know that something changed.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    });
    Sse::new(events).keep_alive(KeepAlive::default())
}
