use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    response::{ApiResponse, Meta, Notice},
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Invalid form data: {}", .0.body_text())]
    Form(#[from] MultipartError),

    #[error("Could not load products: {0}")]
    Fetch(#[source] StoreError),

    #[error("Image upload failed: {0}")]
    Upload(#[source] StoreError),

    #[error("Could not save product: {0}")]
    Insert(#[source] StoreError),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notices: Vec<Notice>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            // 413 for oversized bodies, 400 for malformed ones.
            AppError::Form(err) => err.status(),
            AppError::Fetch(_) | AppError::Upload(_) | AppError::Insert(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Error response that also carries the notices collected before the
    /// failure, such as an earlier upload warning.
    pub fn into_response_with(self, notices: Vec<Notice>) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::BadRequest(_) | AppError::Form(_) => self.to_string(),
            AppError::Fetch(_) => "Fetch failed".to_string(),
            AppError::Upload(_) => "Upload failed".to_string(),
            AppError::Insert(_) => "Insert failed".to_string(),
        };

        let body = ApiResponse {
            message,
            data: Some(ErrorData {
                error: self.to_string(),
                notices,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(Vec::new())
    }
}

pub type AppResult<T> = Result<T, AppError>;
