use std::env;

pub const DEFAULT_PRODUCTS_TABLE: &str = "products";
pub const DEFAULT_IMAGE_BUCKET: &str = "product_photos";
/// Upper bound for a form submission, photo included.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    pub host: String,
    pub port: u16,
    pub products_table: String,
    pub image_bucket: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let supabase_url = env::var("SUPABASE_URL")
            .map_err(|_| anyhow::anyhow!("SUPABASE_URL is not set"))?;
        let supabase_key = env::var("SUPABASE_KEY")
            .map_err(|_| anyhow::anyhow!("SUPABASE_KEY is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let products_table =
            env::var("PRODUCTS_TABLE").unwrap_or_else(|_| DEFAULT_PRODUCTS_TABLE.to_string());
        let image_bucket =
            env::var("IMAGE_BUCKET").unwrap_or_else(|_| DEFAULT_IMAGE_BUCKET.to_string());
        Ok(Self {
            supabase_url,
            supabase_key,
            host,
            port,
            products_table,
            image_bucket,
        })
    }
}
