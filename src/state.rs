use std::sync::Arc;

use crate::{
    config::AppConfig,
    events::CatalogEvents,
    store::{ImageBucket, ImageStore, ProductStore, ProductsTable, RemoteClient, StoreError},
};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub images: Arc<dyn ImageStore>,
    pub events: CatalogEvents,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductStore>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            products,
            images,
            events: CatalogEvents::new(),
        }
    }

    /// Wire both seams to a single remote client built from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let client = Arc::new(RemoteClient::new(
            &config.supabase_url,
            &config.supabase_key,
        )?);
        let products = ProductsTable::new(client.clone(), config.products_table.clone());
        let images = ImageBucket::new(client, config.image_bucket.clone());
        Ok(Self::new(Arc::new(products), Arc::new(images)))
    }
}
