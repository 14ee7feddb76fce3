// Shared fakes for the integration tests.
#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use bytes::Bytes;
use rust_decimal::Decimal;
use shop_inventory::{
    dto::intake::{ImageFile, ImageSource, IntakeForm},
    models::{NewProduct, Product},
    state::AppState,
    store::{ImageStore, ProductStore, StoreError},
};

pub const PUBLIC_BASE: &str = "https://cdn.test/storage/v1/object/public/product_photos";

fn unavailable() -> StoreError {
    StoreError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

/// In-memory products table. Inserted records become fetchable rows.
#[derive(Default)]
pub struct MemoryProducts {
    pub rows: Mutex<Vec<Product>>,
    pub inserted: Mutex<Vec<NewProduct>>,
    pub fail_fetch: AtomicBool,
    pub fail_insert: AtomicBool,
}

impl MemoryProducts {
    pub fn with_rows(rows: Vec<Product>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn inserted(&self) -> Vec<NewProduct> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductStore for MemoryProducts {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn insert_product(&self, record: &NewProduct) -> Result<(), StoreError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inserted.lock().unwrap().push(record.clone());
        self.rows.lock().unwrap().push(Product::from(record.clone()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

/// In-memory bucket.
#[derive(Default)]
pub struct MemoryImages {
    pub objects: Mutex<Vec<StoredObject>>,
    pub fail_upload: AtomicBool,
}

impl MemoryImages {
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for MemoryImages {
    async fn upload(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StoreError> {
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.objects.lock().unwrap().push(StoredObject {
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len(),
        });
        Ok(())
    }

    fn public_url(&self, key: &str) -> Result<String, StoreError> {
        Ok(format!("{PUBLIC_BASE}/{key}"))
    }
}

pub struct Harness {
    pub state: AppState,
    pub products: Arc<MemoryProducts>,
    pub images: Arc<MemoryImages>,
}

pub fn harness(rows: Vec<Product>) -> Harness {
    let products = Arc::new(MemoryProducts::with_rows(rows));
    let images = Arc::new(MemoryImages::default());
    let state = AppState::new(products.clone(), images.clone());
    Harness {
        state,
        products,
        images,
    }
}

pub fn row(name: Option<&str>, category: &str, price: Decimal, stock: i64) -> Product {
    Product {
        id: None,
        name: name.map(str::to_string),
        category: Some(category.to_string()),
        price: Some(price),
        stock: Some(stock),
        image_url: None,
        created_at: None,
    }
}

pub fn named(names: &[&str]) -> Vec<Product> {
    names
        .iter()
        .map(|name| row(Some(name), "Phones", Decimal::new(100, 1), 1))
        .collect()
}

pub fn form(name: &str, image: ImageSource) -> IntakeForm {
    IntakeForm {
        name: name.to_string(),
        category: "Phones".to_string(),
        price: "25.0".to_string(),
        stock: "10".to_string(),
        image,
    }
}

pub fn png(filename: &str) -> ImageFile {
    ImageFile {
        filename: filename.to_string(),
        content_type: "image/png".to_string(),
        bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\nfake"),
    }
}
