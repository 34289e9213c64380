// ============================================================================
// UPLOAD SERVICE - Pipeline validar -> comprimir -> sanear -> subir -> URL
// ============================================================================
// Los errores nunca salen como Err: terminan en UploadState.error y el
// resultado es None. Las validaciones usan mensajes fijos; los fallos de
// compresión/red pasan por translate_error.
// ============================================================================

use std::rc::Rc;
use crate::config::CONFIG;
use crate::models::{SelectedFile, UploadOptions, UploadProgress};
use crate::services::error_translation::{translate_error, translate_message, DELETE_FALLBACK, UPLOAD_FALLBACK};
use crate::services::image_compression::{ImageCompressor, PassthroughCompressor};
use crate::services::storage_service::{FileUploadOptions, StorageBackend, SupabaseStorage};
use crate::services::upload_validation::validate_file;
use crate::state::UploadState;
use crate::utils::file_name::{sanitize_file_name, storage_path, unique_file_name};
use crate::utils::file_signature::{extension_of, preferred_extension};
use crate::utils::random::{Clock, OsRandom, RandomSource, SystemClock};

/// Archivo ya guardado en el storage
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Ruta dentro del bucket (para borrarlo después)
    pub path: String,
    pub public_url: String,
}

#[derive(Clone)]
pub struct UploadService {
    storage: Rc<dyn StorageBackend>,
    compressor: Rc<dyn ImageCompressor>,
    random: Rc<dyn RandomSource>,
    clock: Rc<dyn Clock>,
    bucket: String,
    cache_control_seconds: u32,
}

impl UploadService {
    pub fn new(
        storage: Rc<dyn StorageBackend>,
        compressor: Rc<dyn ImageCompressor>,
        random: Rc<dyn RandomSource>,
        clock: Rc<dyn Clock>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            compressor,
            random,
            clock,
            bucket: bucket.into(),
            cache_control_seconds: CONFIG.upload_config.cache_control_seconds,
        }
    }

    /// Servicio real: storage de Supabase + compresión con canvas en el navegador
    pub fn from_config() -> Self {
        #[cfg(target_arch = "wasm32")]
        let compressor: Rc<dyn ImageCompressor> =
            Rc::new(crate::services::image_compression::CanvasCompressor::from_config());
        #[cfg(not(target_arch = "wasm32"))]
        let compressor: Rc<dyn ImageCompressor> = Rc::new(PassthroughCompressor);

        Self::new(
            Rc::new(SupabaseStorage::from_config()),
            compressor,
            Rc::new(OsRandom),
            Rc::new(SystemClock),
            CONFIG.upload_config.bucket.clone(),
        )
    }

    /// Mismo servicio sin compresión (documentos, o imágenes que deben quedar intactas)
    pub fn without_compression(mut self) -> Self {
        self.compressor = Rc::new(PassthroughCompressor);
        self
    }

    /// Sube el archivo y devuelve su URL pública, o None (ver `state.error()`)
    pub async fn upload(
        &self,
        state: &UploadState,
        file: Option<SelectedFile>,
        options: &UploadOptions,
    ) -> Option<String> {
        self.upload_file(state, file, options)
            .await
            .map(|uploaded| uploaded.public_url)
    }

    /// Igual que `upload` pero conserva también la ruta en el bucket
    pub async fn upload_file(
        &self,
        state: &UploadState,
        file: Option<SelectedFile>,
        options: &UploadOptions,
    ) -> Option<UploadedFile> {
        state.reset();

        if let Err(e) = validate_file(file.as_ref(), options) {
            log::warn!("⚠️ Archivo rechazado: {}", e);
            state.fail(e.to_string());
            return None;
        }
        let file = file?;

        state.begin(file.size());

        match self.store(state, file, options).await {
            Ok(uploaded) => {
                let total = state.progress().total;
                state.complete(total);
                log::info!("✅ Subida completa: {}", uploaded.public_url);
                Some(uploaded)
            }
            Err(message) => {
                log::error!("❌ Subida fallida: {}", message);
                state.fail(message);
                None
            }
        }
    }

    /// Pasos 6-9; el error ya viene traducido
    async fn store(
        &self,
        state: &UploadState,
        file: SelectedFile,
        options: &UploadOptions,
    ) -> Result<UploadedFile, String> {
        let file = if file.is_image() {
            self.compressor
                .compress(file)
                .await
                .map_err(|e| translate_message(&e, UPLOAD_FALLBACK))?
        } else {
            file
        };
        let total = file.size();
        state.set_progress(UploadProgress::new(0, total));

        let path = self.destination(&file, options)?;

        let upload_options = FileUploadOptions {
            cache_control_seconds: self.cache_control_seconds,
            ..FileUploadOptions::new(file.declared_type.clone())
        };

        let stored_path = self
            .storage
            .upload(&self.bucket, &path, &file.bytes, &upload_options)
            .await
            .map_err(|e| translate_error(&e, UPLOAD_FALLBACK))?;

        state.set_progress(UploadProgress::complete(total));

        Ok(UploadedFile {
            public_url: self.storage.public_url(&self.bucket, &stored_path),
            path: stored_path,
        })
    }

    /// Nombre saneado (propio o generado) dentro de la carpeta pedida
    fn destination(&self, file: &SelectedFile, options: &UploadOptions) -> Result<String, String> {
        let custom = options
            .custom_name
            .as_deref()
            .map(sanitize_file_name)
            .filter(|name| !name.is_empty() && name != "." && !name.contains(".."));

        let name = match custom {
            Some(name) => name,
            None => {
                let ext = extension_of(&file.name)
                    .or_else(|| preferred_extension(&file.declared_type).map(str::to_string))
                    .map(|ext| sanitize_file_name(&ext))
                    .unwrap_or_default();
                unique_file_name(self.clock.now_ms(), &ext, self.random.as_ref())
                    .map_err(|e| translate_message(&e, UPLOAD_FALLBACK))?
            }
        };

        Ok(storage_path(options.folder.as_deref(), &name))
    }

    /// Elimina un objeto del bucket; el error queda en `state` sin tocar la subida
    pub async fn delete_file(&self, state: &UploadState, path: &str) -> bool {
        let paths = vec![path.to_string()];
        match self.storage.remove(&self.bucket, &paths).await {
            Ok(()) => {
                log::info!("🗑️ Archivo eliminado: {}", path);
                true
            }
            Err(e) => {
                log::error!("❌ Error eliminando {}: {}", path, e);
                state.set_error(Some(translate_error(&e, DELETE_FALLBACK)));
                false
            }
        }
    }

    /// Ruta en el bucket a partir de una URL pública de este servicio
    pub fn path_from_public_url(&self, url: &str) -> Option<String> {
        let marker = format!("/object/public/{}/", self.bucket);
        url.split_once(&marker)
            .map(|(_, path)| path.split(['?', '#']).next().unwrap_or(path).to_string())
            .filter(|path| !path.is_empty())
    }
}
