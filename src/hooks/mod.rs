pub mod app_state_context;
pub mod use_cached_fetch;
pub mod use_app_state;
pub mod use_file_upload;

pub use app_state_context::{AppStateProvider, AppStateProviderProps};
pub use use_cached_fetch::{use_cached_fetch, UseCachedFetchHandle};
pub use use_app_state::{use_app_state, use_cached_content, UseCachedContentHandle};
pub use use_file_upload::{use_file_upload, UploadRequest, UseFileUploadHandle};
