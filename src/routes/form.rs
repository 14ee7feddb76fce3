use axum::extract::Multipart;

use crate::{
    dto::intake::{ImageFile, ImageMode, ImageSource, IntakeForm},
    error::{AppError, AppResult},
};

/// Read the intake form from a `multipart/form-data` body.
///
/// Only the input of the selected image mode is kept; an empty file part
/// (browsers send one when nothing was chosen) counts as no file.
pub async fn read_intake_form(mut multipart: Multipart) -> AppResult<IntakeForm> {
    let mut form = IntakeForm::default();
    let mut mode = ImageMode::default();
    let mut file: Option<ImageFile> = None;
    let mut pasted = String::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        if field_name == "image_file" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            if !filename.is_empty() && !bytes.is_empty() {
                let content_type = content_type
                    .unwrap_or_else(|| ImageFile::guess_content_type(&filename).to_string());
                file = Some(ImageFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            continue;
        }

        let value = field.text().await?;
        match field_name.as_str() {
            "name" => form.name = value,
            "category" => form.category = value,
            "price" => form.price = value,
            "stock" => form.stock = value,
            "image_mode" => {
                mode = ImageMode::parse(&value).ok_or_else(|| {
                    AppError::BadRequest(format!("unknown image mode: {value}"))
                })?
            }
            "image_url" => pasted = value,
            _ => {}
        }
    }

    form.image = match mode {
        ImageMode::Upload => ImageSource::Upload(file),
        ImageMode::PasteUrl => ImageSource::PasteUrl(pasted),
    };
    Ok(form)
}
