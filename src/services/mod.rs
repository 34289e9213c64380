pub mod storage_service;
pub mod error_translation;
pub mod upload_validation;
pub mod image_compression;
pub mod upload_service;
pub mod content_service;
pub mod fetch_action;

pub use storage_service::*;
pub use error_translation::*;
pub use upload_validation::*;
pub use image_compression::*;
pub use upload_service::*;
pub use content_service::*;
pub use fetch_action::*;
