use crate::{
    dto::catalog::{COLUMN_COUNT, CatalogView, NO_MATCHES_MESSAGE, Tile},
    error::{AppError, AppResult},
    models::Product,
    state::AppState,
};

// A blank query matches everything, including rows without a name.
pub fn name_matches(name: Option<&str>, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    match name {
        Some(name) => name.to_lowercase().contains(&query.to_lowercase()),
        None => false,
    }
}

pub fn filter_by_name(products: Vec<Product>, query: &str) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| name_matches(p.name.as_deref(), query))
        .collect()
}

pub fn arrange_columns<T>(items: impl IntoIterator<Item = T>) -> Vec<Vec<T>> {
    let mut columns: Vec<Vec<T>> = (0..COLUMN_COUNT).map(|_| Vec::new()).collect();
    for (index, item) in items.into_iter().enumerate() {
        columns[index % COLUMN_COUNT].push(item);
    }
    columns
}

pub fn build_view(products: Vec<Product>, query: &str) -> CatalogView {
    if products.is_empty() {
        return CatalogView::empty();
    }

    let query = query.trim().to_string();
    let filtered = filter_by_name(products, &query);
    let matches = filtered.len();
    let note = (matches == 0).then(|| NO_MATCHES_MESSAGE.to_string());
    let columns = arrange_columns(filtered.iter().map(Tile::from));

    CatalogView::Grid {
        query,
        matches,
        columns,
        note,
    }
}

pub async fn fetch_products(state: &AppState) -> AppResult<Vec<Product>> {
    state.products.fetch_products().await.map_err(|err| {
        tracing::warn!(error = %err, "product fetch failed");
        AppError::Fetch(err)
    })
}

pub async fn list_products(state: &AppState, query: &str) -> AppResult<Vec<Product>> {
    let products = fetch_products(state).await?;
    Ok(filter_by_name(products, query))
}

pub async fn load_catalog(state: &AppState, query: &str) -> AppResult<CatalogView> {
    let products = fetch_products(state).await?;
    tracing::debug!(rows = products.len(), query, "catalog fetched");
    Ok(build_view(products, query))
}
