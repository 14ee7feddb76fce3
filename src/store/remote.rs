use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    Client, Response, Url,
    header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

use super::{ImageStore, ProductStore, StoreError};
use crate::models::{NewProduct, Product};

/// HTTP client for a hosted project exposing a REST table API under
/// `/rest/v1` and object storage under `/storage/v1`.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: Url,
    client: Client,
}

impl RemoteClient {
    pub fn new(base_url: &str, access_key: &str) -> Result<Self, StoreError> {
        let base_url =
            Url::parse(base_url).map_err(|_| StoreError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(access_key).map_err(|_| StoreError::InvalidHeader)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {access_key}"))
            .map_err(|_| StoreError::InvalidHeader)?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { base_url, client })
    }

    /// `GET /rest/v1/{table}?select=*` with optional PostgREST filters such as
    /// `("name", "ilike.*case*")`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let url = self.endpoint(&["rest", "v1", table])?;
        let response = self
            .client
            .get(url)
            .query(&[("select", "*")])
            .query(filters)
            .send()
            .await?;
        let body = ensure_success(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn insert<T: Serialize + ?Sized>(
        &self,
        table: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        let url = self.endpoint(&["rest", "v1", table])?;
        let response = self
            .client
            .post(url)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let url = self.object_url(&["storage", "v1", "object", bucket], key)?;
        let size = bytes.len();
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, "max-age=3600")
            .body(bytes)
            .send()
            .await?;
        ensure_success(response).await?;
        tracing::debug!(bucket, key, size, "object uploaded");
        Ok(())
    }

    pub fn public_url(&self, bucket: &str, key: &str) -> Result<String, StoreError> {
        self.object_url(&["storage", "v1", "object", "public", bucket], key)
            .map(String::from)
    }

    fn object_url(&self, prefix: &[&str], key: &str) -> Result<Url, StoreError> {
        let mut url = self.endpoint(prefix)?;
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.base_url.to_string()))?
            .extend(key.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

/// The products table, as seen through a [`RemoteClient`].
#[derive(Debug, Clone)]
pub struct ProductsTable {
    client: Arc<RemoteClient>,
    table: String,
}

impl ProductsTable {
    pub fn new(client: Arc<RemoteClient>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl ProductStore for ProductsTable {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        self.client.select(&self.table, &[]).await
    }

    async fn insert_product(&self, record: &NewProduct) -> Result<(), StoreError> {
        self.client.insert(&self.table, record).await
    }
}

/// A storage bucket, as seen through a [`RemoteClient`].
#[derive(Debug, Clone)]
pub struct ImageBucket {
    client: Arc<RemoteClient>,
    bucket: String,
}

impl ImageBucket {
    pub fn new(client: Arc<RemoteClient>, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ImageStore for ImageBucket {
    async fn upload(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StoreError> {
        self.client.upload(&self.bucket, key, bytes, content_type).await
    }

    fn public_url(&self, key: &str) -> Result<String, StoreError> {
        self.client.public_url(&self.bucket, key)
    }
}
