use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    events::CatalogChanged,
    models::{Category, NewProduct},
    response::Notice,
};

pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];
pub const DEFAULT_PRICE: &str = "0.00";
pub const DEFAULT_STOCK: &str = "1";

/// An image picked in "upload file" mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ImageFile {
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    pub fn has_accepted_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ACCEPTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Content type implied by the extension, for clients that send none.
    pub fn guess_content_type(filename: &str) -> &'static str {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageMode {
    #[default]
    Upload,
    PasteUrl,
}

impl ImageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMode::Upload => "upload",
            ImageMode::PasteUrl => "paste_url",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "upload" => Some(ImageMode::Upload),
            "paste_url" => Some(ImageMode::PasteUrl),
            _ => None,
        }
    }
}

/// Where the product photo comes from. Only one mode holds input at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Upload(Option<ImageFile>),
    PasteUrl(String),
}

impl Default for ImageSource {
    fn default() -> Self {
        ImageSource::Upload(None)
    }
}

impl ImageSource {
    pub fn mode(&self) -> ImageMode {
        match self {
            ImageSource::Upload(_) => ImageMode::Upload,
            ImageSource::PasteUrl(_) => ImageMode::PasteUrl,
        }
    }

    /// Switch to `mode`, dropping whatever the other mode held.
    pub fn switch_to(self, mode: ImageMode) -> Self {
        match (self, mode) {
            (source @ ImageSource::Upload(_), ImageMode::Upload) => source,
            (source @ ImageSource::PasteUrl(_), ImageMode::PasteUrl) => source,
            (_, ImageMode::Upload) => ImageSource::Upload(None),
            (_, ImageMode::PasteUrl) => ImageSource::PasteUrl(String::new()),
        }
    }
}

/// The intake form as the user filled it in.
///
/// Values stay as typed so a rejected submission can be shown again unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub image: ImageSource,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Category::default().to_string(),
            price: DEFAULT_PRICE.to_string(),
            stock: DEFAULT_STOCK.to_string(),
            image: ImageSource::default(),
        }
    }
}

/// Multipart field names shared by the HTML form and the JSON API.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct IntakeUpload {
    pub name: String,
    #[schema(value_type = Category)]
    pub category: String,
    #[schema(example = "25.50")]
    pub price: String,
    #[schema(example = "10")]
    pub stock: String,
    pub image_mode: Option<ImageMode>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image_file: Option<Vec<u8>>,
    pub image_url: Option<String>,
}

/// A record was written.
#[derive(Debug)]
pub struct Submitted {
    pub record: NewProduct,
    pub notices: Vec<Notice>,
    pub event: CatalogChanged,
}

/// Nothing was written; `form` is exactly what the user sent.
#[derive(Debug)]
pub struct Rejected {
    pub form: IntakeForm,
    pub error: AppError,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionData {
    pub record: NewProduct,
    pub notices: Vec<Notice>,
    pub revision: u64,
}

impl From<Submitted> for SubmissionData {
    fn from(submitted: Submitted) -> Self {
        SubmissionData {
            record: submitted.record,
            notices: submitted.notices,
            revision: submitted.event.revision,
        }
    }
}
