// ============================================================================
// UPLOAD STATE - Estado local de un campo de subida (uploading/progress/error)
// ============================================================================

use crate::models::{UploadProgress, UploadSnapshot};
use crate::state::reactivity::{ReactiveState, SubscriptionId};

/// Estado de un intento de subida; cada campo de formulario tiene el suyo
#[derive(Clone, PartialEq)]
pub struct UploadState {
    inner: ReactiveState<UploadSnapshot>,
}

impl UploadState {
    pub fn new() -> Self {
        Self {
            inner: ReactiveState::new(UploadSnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> UploadSnapshot {
        self.inner.get()
    }

    pub fn is_uploading(&self) -> bool {
        self.inner.with(|s| s.uploading)
    }

    pub fn error(&self) -> Option<String> {
        self.inner.with(|s| s.error.clone())
    }

    pub fn progress(&self) -> UploadProgress {
        self.inner.with(|s| s.progress)
    }

    /// Inicio de la subida (tras validar)
    pub fn begin(&self, total: u64) {
        self.inner.set(UploadSnapshot {
            uploading: true,
            progress: UploadProgress::new(0, total),
            error: None,
        });
    }

    pub fn set_progress(&self, progress: UploadProgress) {
        self.inner.update(|s| s.progress = progress);
    }

    pub fn complete(&self, total: u64) {
        self.inner.update(|s| {
            s.uploading = false;
            s.progress = UploadProgress::complete(total);
        });
    }

    /// Error visible junto al selector de archivo
    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.inner.update(|s| {
            s.uploading = false;
            s.error = Some(message);
        });
    }

    /// Error de borrado: no toca uploading/progress
    pub fn set_error(&self, message: Option<String>) {
        self.inner.update(|s| s.error = message);
    }

    pub fn reset(&self) {
        self.inner.set(UploadSnapshot::default());
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        self.inner.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.unsubscribe(id);
    }
}

impl Default for UploadState {
    fn default() -> Self {
        Self::new()
    }
}
