pub mod catalog_service;
pub mod image_service;
pub mod intake_service;
