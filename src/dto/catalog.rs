use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

pub const COLUMN_COUNT: usize = 3;
pub const CURRENCY_PREFIX: &str = "S/";
pub const STOCK_UNIT: &str = "units";
pub const EMPTY_CATALOG_MESSAGE: &str = "No products registered yet.";
pub const NO_MATCHES_MESSAGE: &str = "No products match your search.";

/// One grid cell of the inventory view.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Tile {
    /// `None` renders the "No image" placeholder.
    pub image_url: Option<String>,
    pub name: String,
    pub category: String,
    pub stock_label: String,
    pub price_label: String,
}

impl From<&Product> for Tile {
    fn from(product: &Product) -> Self {
        Tile {
            image_url: product
                .image_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            name: product.name.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
            // Missing numbers show as zero.
            stock_label: format!("{} {STOCK_UNIT}", product.stock.unwrap_or_default()),
            price_label: format!(
                "{CURRENCY_PREFIX} {:.2}",
                product.price.unwrap_or_default()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CatalogView {
    /// The store holds no products at all.
    Empty { message: String },
    Grid {
        query: String,
        matches: usize,
        columns: Vec<Vec<Tile>>,
        note: Option<String>,
    },
}

impl CatalogView {
    pub fn empty() -> Self {
        CatalogView::Empty {
            message: EMPTY_CATALOG_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
