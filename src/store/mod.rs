//! Seams to the hosted table store and object storage.
//!
//! The catalog and intake services only see [`ProductStore`] and
//! [`ImageStore`]; [`remote::RemoteClient`] backs both in production.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::models::{NewProduct, Product};

pub mod remote;

pub use remote::{ImageBucket, ProductsTable, RemoteClient};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid endpoint: {0}")]
    InvalidUrl(String),

    #[error("invalid access key header")]
    InvalidHeader,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product row, in the store's natural order.
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn insert_product(&self, record: &NewProduct) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StoreError>;

    /// Unauthenticated URL of the object stored at `key`. No request is made.
    fn public_url(&self, key: &str) -> Result<String, StoreError>;
}
