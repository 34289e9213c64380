pub mod file_upload_field;
pub mod refresh_indicator;

pub use file_upload_field::{FileUploadField, FileUploadFieldProps};
pub use refresh_indicator::{RefreshIndicator, RefreshIndicatorProps};
