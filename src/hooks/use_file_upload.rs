// ============================================================================
// USE FILE UPLOAD HOOK - Estado de subida por campo + acciones
// ============================================================================

use yew::prelude::*;
use crate::models::{SelectedFile, UploadOptions, UploadProgress};
use crate::services::{UploadService, UploadedFile};
use crate::state::UploadState;

/// Pedido de subida; `on_complete` recibe None si falló (ver `error`)
#[derive(Clone)]
pub struct UploadRequest {
    pub file: Option<SelectedFile>,
    pub options: UploadOptions,
    pub on_complete: Callback<Option<UploadedFile>>,
}

#[derive(Clone)]
pub struct UseFileUploadHandle {
    pub uploading: bool,
    pub progress: UploadProgress,
    pub error: Option<String>,
    pub upload: Callback<UploadRequest>,
    /// (ruta en el bucket, callback con el resultado)
    pub delete_file: Callback<(String, Callback<bool>)>,
    pub reset: Callback<()>,
    /// Error ajeno al pipeline (p. ej. no se pudo leer el archivo)
    pub report_error: Callback<String>,
    pub service: UploadService,
}

/// `compress = false` sube las imágenes tal cual (p. ej. planos o escaneos)
#[hook]
pub fn use_file_upload(compress: bool) -> UseFileUploadHandle {
    let state = (*use_state(UploadState::new)).clone();
    let service = (*use_state(move || {
        let service = UploadService::from_config();
        if compress {
            service
        } else {
            service.without_compression()
        }
    }))
    .clone();
    let force_update = use_force_update();

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            let id = state.subscribe(move || force_update.force_update());
            move || state.unsubscribe(id)
        });
    }

    let upload = {
        let state = state.clone();
        let service = service.clone();
        Callback::from(move |request: UploadRequest| {
            let state = state.clone();
            let service = service.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let uploaded = service
                    .upload_file(&state, request.file, &request.options)
                    .await;
                request.on_complete.emit(uploaded);
            });
        })
    };

    let delete_file = {
        let state = state.clone();
        let service = service.clone();
        Callback::from(move |(path, on_complete): (String, Callback<bool>)| {
            let state = state.clone();
            let service = service.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let deleted = service.delete_file(&state, &path).await;
                on_complete.emit(deleted);
            });
        })
    };

    let reset = {
        let state = state.clone();
        Callback::from(move |_| state.reset())
    };

    let report_error = {
        let state = state.clone();
        Callback::from(move |message: String| state.fail(message))
    };

    let snapshot = state.snapshot();

    UseFileUploadHandle {
        uploading: snapshot.uploading,
        progress: snapshot.progress,
        error: snapshot.error,
        upload,
        delete_file,
        reset,
        report_error,
        service,
    }
}
