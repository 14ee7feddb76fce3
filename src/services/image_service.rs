use chrono::{Local, NaiveDateTime};

use crate::{
    dto::intake::ImageFile,
    error::{AppError, AppResult},
    response::Notice,
    store::ImageStore,
};

pub const IMAGE_FOLDER: &str = "items";

// Second resolution: two uploads of the same file name within one second
// share a key.
pub fn object_key(at: NaiveDateTime, filename: &str) -> String {
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);
    format!(
        "{IMAGE_FOLDER}/img_{}_{}",
        at.format("%Y%m%d_%H%M%S"),
        base
    )
}

pub async fn upload_image(
    images: &dyn ImageStore,
    file: &ImageFile,
    at: NaiveDateTime,
) -> AppResult<String> {
    let key = object_key(at, &file.filename);
    images
        .upload(&key, file.bytes.clone(), &file.content_type)
        .await
        .map_err(AppError::Upload)?;
    let url = images.public_url(&key).map_err(AppError::Upload)?;
    tracing::info!(key = %key, "image uploaded");
    Ok(url)
}

/// Like [`upload_image`], but a failure only adds a warning notice.
pub async fn resolve_image_url(
    images: &dyn ImageStore,
    file: &ImageFile,
    notices: &mut Vec<Notice>,
) -> Option<String> {
    match upload_image(images, file, Local::now().naive_local()).await {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::warn!(error = %err, filename = %file.filename, "image upload failed");
            notices.push(Notice::warning(err.to_string()));
            None
        }
    }
}
