use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        catalog::{CatalogView, ProductList, Tile},
        intake::{ImageMode, IntakeUpload, SubmissionData},
    },
    events::CatalogChanged,
    models::{Category, NewProduct, Product},
    response::{ApiResponse, Meta, Notice, NoticeLevel},
    routes::{catalog, health, params, products, sales},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        catalog::get_catalog,
        catalog::catalog_events,
        sales::sales_status
    ),
    components(
        schemas(
            Product,
            NewProduct,
            Category,
            Tile,
            CatalogView,
            CatalogChanged,
            ProductList,
            ImageMode,
            IntakeUpload,
            SubmissionData,
            Notice,
            NoticeLevel,
            params::SearchQuery,
            sales::SalesStatus,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CatalogView>,
            ApiResponse<SubmissionData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product listing and intake"),
        (name = "Catalog", description = "Inventory grid and change notifications"),
        (name = "Sales", description = "Reserved for the sales module"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
