use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    dto::intake::{ImageSource, IntakeForm, Rejected, Submitted},
    error::{AppError, AppResult},
    models::{Category, NewProduct},
    response::Notice,
    services::image_service,
    state::AppState,
};

pub const PRODUCT_SAVED_MESSAGE: &str = "Product added successfully!";

#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub category: Category,
    pub price: Decimal,
    pub stock: i64,
}

pub fn validate(form: &IntakeForm) -> AppResult<ProductFields> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }

    let category = Category::from_str(&form.category).map_err(AppError::BadRequest)?;

    let price = Decimal::from_str(form.price.trim())
        .map_err(|_| AppError::BadRequest("price must be a number".to_string()))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::BadRequest(
            "price must not be negative".to_string(),
        ));
    }

    let stock = form
        .stock
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("stock must be a whole number".to_string()))?;
    if stock < 1 {
        return Err(AppError::BadRequest(
            "stock must be at least 1".to_string(),
        ));
    }

    if let ImageSource::Upload(Some(file)) = &form.image {
        if !file.has_accepted_extension() {
            return Err(AppError::BadRequest(
                "image must be a png, jpg, jpeg or webp file".to_string(),
            ));
        }
    }

    Ok(ProductFields {
        name: name.to_string(),
        category,
        price: price.abs(),
        stock,
    })
}

// Upload and insert are not grouped: a failed insert after a successful
// upload leaves the object in the bucket.
pub async fn submit_product(state: &AppState, form: IntakeForm) -> Result<Submitted, Rejected> {
    let mut notices = Vec::new();

    let fields = match validate(&form) {
        Ok(fields) => fields,
        Err(error) => return Err(reject(form, error, notices)),
    };

    let image_url = match &form.image {
        ImageSource::Upload(Some(file)) => {
            image_service::resolve_image_url(state.images.as_ref(), file, &mut notices).await
        }
        ImageSource::Upload(None) => None,
        ImageSource::PasteUrl(url) if url.trim().is_empty() => None,
        ImageSource::PasteUrl(url) => Some(url.clone()),
    };

    let record = NewProduct {
        name: fields.name,
        category: fields.category,
        price: fields.price,
        stock: fields.stock,
        image_url,
    };

    if let Err(err) = state.products.insert_product(&record).await {
        tracing::warn!(error = %err, name = %record.name, "product insert failed");
        return Err(reject(form, AppError::Insert(err), notices));
    }

    let event = state.events.publish();
    tracing::info!(
        name = %record.name,
        category = %record.category,
        revision = event.revision,
        "product created"
    );
    notices.push(Notice::success(PRODUCT_SAVED_MESSAGE));

    Ok(Submitted {
        record,
        notices,
        event,
    })
}

fn reject(form: IntakeForm, error: AppError, mut notices: Vec<Notice>) -> Rejected {
    notices.push(Notice::error(error.to_string()));
    Rejected {
        form,
        error,
        notices,
    }
}
