pub mod cache;
pub mod content;
pub mod upload;

pub use cache::{CacheStatus, Freshness};
pub use content::{ContentSlice, DataKey};
pub use upload::{SelectedFile, UploadOptions, UploadProgress, UploadSnapshot};
