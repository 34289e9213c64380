// Flujo completo de subida contra un storage en memoria

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use futures::executor::block_on;
use portal_municipal::config::CONFIG;
use portal_municipal::models::{SelectedFile, UploadOptions};
use portal_municipal::services::{
    FileUploadOptions, ImageCompressor, PassthroughCompressor, StorageBackend, StorageError,
    UploadService,
};
use portal_municipal::state::UploadState;
use portal_municipal::utils::{Clock, RandomSource};

const NOW: i64 = 1_700_000_000_000;
const MB: usize = 1024 * 1024;

#[derive(Default)]
struct MemoryStorage {
    objects: RefCell<HashMap<String, Vec<u8>>>,
    last_options: RefCell<Option<FileUploadOptions>>,
    upload_error: RefCell<Option<StorageError>>,
    remove_error: RefCell<Option<StorageError>>,
    calls: Cell<usize>,
}

#[async_trait(?Send)]
impl StorageBackend for MemoryStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        options: &FileUploadOptions,
    ) -> Result<String, StorageError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(e) = self.upload_error.borrow().clone() {
            return Err(e);
        }
        let key = format!("{}/{}", bucket, path);
        if self.objects.borrow().contains_key(&key) && !options.upsert {
            return Err(StorageError::http(409, Some("Duplicate".into()), "The resource already exists"));
        }
        self.objects.borrow_mut().insert(key, bytes.to_vec());
        *self.last_options.borrow_mut() = Some(options.clone());
        Ok(path.to_string())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://cdn.test/storage/v1/object/public/{}/{}", bucket, path)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        if let Some(e) = self.remove_error.borrow().clone() {
            return Err(e);
        }
        let mut objects = self.objects.borrow_mut();
        for path in paths {
            objects.remove(&format!("{}/{}", bucket, path));
        }
        Ok(())
    }
}

struct FixedRandom(u8);

impl RandomSource for FixedRandom {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), String> {
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.0 + i as u8;
        }
        Ok(())
    }
}

struct BrokenRandom;

impl RandomSource for BrokenRandom {
    fn fill_bytes(&self, _buf: &mut [u8]) -> Result<(), String> {
        Err("getrandom no disponible".to_string())
    }
}

/// Re-codifica cualquier imagen a un WebP de 1 KB
struct WebpCompressor;

#[async_trait(?Send)]
impl ImageCompressor for WebpCompressor {
    async fn compress(&self, file: SelectedFile) -> Result<SelectedFile, String> {
        let mut bytes = vec![0u8; 1024];
        bytes[..4].copy_from_slice(b"RIFF");
        bytes[8..12].copy_from_slice(b"WEBP");
        let stem = file.name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file.name.as_str());
        Ok(SelectedFile::new(format!("{}.webp", stem), "image/webp", bytes))
    }
}

struct BrokenCompressor;

#[async_trait(?Send)]
impl ImageCompressor for BrokenCompressor {
    async fn compress(&self, _file: SelectedFile) -> Result<SelectedFile, String> {
        Err("No se pudo decodificar la imagen".to_string())
    }
}

struct FixedClock;

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        NOW
    }
}

fn service(storage: Rc<MemoryStorage>) -> UploadService {
    service_with(storage, Rc::new(PassthroughCompressor), Rc::new(FixedRandom(0x0a)))
}

fn service_with(
    storage: Rc<MemoryStorage>,
    compressor: Rc<dyn ImageCompressor>,
    random: Rc<dyn RandomSource>,
) -> UploadService {
    UploadService::new(storage, compressor, random, Rc::new(FixedClock), "public-files")
}

fn jpeg(name: &str, size: usize) -> SelectedFile {
    let mut bytes = vec![0u8; size];
    bytes[..4].copy_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0]);
    SelectedFile::new(name, "image/jpeg", bytes)
}

fn png(name: &str, size: usize) -> SelectedFile {
    let mut bytes = vec![0u8; size];
    bytes[..8].copy_from_slice(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    SelectedFile::new(name, "image/png", bytes)
}

#[test]
fn oversized_file_is_rejected_before_network() {
    let storage = Rc::new(MemoryStorage::default());
    let state = UploadState::new();

    let url = block_on(service(storage.clone()).upload(&state, Some(jpeg("foto.jpg", 3 * MB)), &UploadOptions::images(2)));

    assert_eq!(url, None);
    let error = state.error().unwrap();
    assert!(error.contains('2'), "{}", error);
    assert!(!state.is_uploading());
    assert_eq!(storage.calls.get(), 0);
}

#[test]
fn missing_file_reports_fixed_message() {
    let storage = Rc::new(MemoryStorage::default());
    let state = UploadState::new();

    let url = block_on(service(storage).upload(&state, None, &UploadOptions::new(5)));

    assert_eq!(url, None);
    assert_eq!(state.error().as_deref(), Some("No se seleccionó ningún archivo"));
}

#[test]
fn valid_jpeg_is_stored_with_generated_name() {
    let storage = Rc::new(MemoryStorage::default());
    let state = UploadState::new();
    let options = UploadOptions::images(2).with_folder("noticias");

    let url = block_on(service(storage.clone()).upload(&state, Some(jpeg("Foto Portada.JPG", 500 * 1024)), &options));

    assert_eq!(
        url.as_deref(),
        Some("https://cdn.test/storage/v1/object/public/public-files/noticias/1700000000000-0a0b0c0d0e0f.jpg")
    );
    assert_eq!(state.progress().percentage, 100);
    assert_eq!(state.error(), None);
    assert!(!state.is_uploading());

    let options = storage.last_options.borrow().clone().unwrap();
    assert_eq!(options.content_type, "image/jpeg");
    assert!(!options.upsert);
}

#[test]
fn spoofed_png_is_rejected() {
    let storage = Rc::new(MemoryStorage::default());
    let state = UploadState::new();
    let mut file = jpeg("logo.png", 1024);
    file.declared_type = "image/png".to_string();

    let url = block_on(service(storage.clone()).upload(&state, Some(file), &UploadOptions::images(2)));

    assert_eq!(url, None);
    assert_eq!(
        state.error().as_deref(),
        Some("El contenido del archivo no corresponde a su tipo declarado")
    );
    assert_eq!(storage.calls.get(), 0);
}

#[test]
fn disallowed_type_is_rejected() {
    let storage = Rc::new(MemoryStorage::default());
    let state = UploadState::new();

    let url = block_on(service(storage).upload(&state, Some(png("mapa.png", 1024)), &UploadOptions::documents(10)));

    assert_eq!(url, None);
    assert_eq!(state.error().as_deref(), Some("Tipo de archivo no permitido"));
}

#[test]
fn duplicate_name_is_translated() {
    let storage = Rc::new(MemoryStorage::default());
    let service = service(storage.clone());
    let options = UploadOptions::images(2).with_custom_name("escudo.png");

    let first = UploadState::new();
    assert!(block_on(service.upload(&first, Some(png("a.png", 2048)), &options)).is_some());

    let second = UploadState::new();
    let url = block_on(service.upload(&second, Some(png("b.png", 2048)), &options));

    assert_eq!(url, None);
    assert_eq!(second.error().as_deref(), Some("Ya existe un archivo con ese nombre"));
    assert!(!second.is_uploading());
}

#[test]
fn unknown_backend_error_uses_fallback() {
    let storage = Rc::new(MemoryStorage::default());
    *storage.upload_error.borrow_mut() = Some(StorageError::http(400, None, "weird"));
    let state = UploadState::new();

    let url = block_on(service(storage).upload(&state, Some(png("a.png", 2048)), &UploadOptions::images(2)));

    assert_eq!(url, None);
    assert_eq!(state.error().as_deref(), Some("Error al subir el archivo"));
}

#[test]
fn custom_name_is_sanitized() {
    let storage = Rc::new(MemoryStorage::default());
    let state = UploadState::new();
    let options = UploadOptions::images(2).with_custom_name("../../etc/passwd.png");

    let uploaded = block_on(service(storage.clone()).upload_file(&state, Some(png("x.png", 2048)), &options)).unwrap();

    assert_eq!(uploaded.path, "etcpasswd.png");
    assert!(storage.objects.borrow().contains_key("public-files/etcpasswd.png"));
}

#[test]
fn delete_failure_keeps_progress() {
    let storage = Rc::new(MemoryStorage::default());
    let service = service(storage.clone());
    let state = UploadState::new();

    let uploaded = block_on(service.upload_file(&state, Some(png("x.png", 2048)), &UploadOptions::images(2))).unwrap();

    *storage.remove_error.borrow_mut() = Some(StorageError::http(403, None, "new row violates row-level security policy"));
    assert!(!block_on(service.delete_file(&state, &uploaded.path)));
    assert_eq!(state.error().as_deref(), Some("No tiene permisos para realizar esta acción"));
    assert_eq!(state.progress().percentage, 100);

    storage.remove_error.borrow_mut().take();
    state.reset();
    assert!(block_on(service.delete_file(&state, &uploaded.path)));
    assert!(storage.objects.borrow().is_empty());
    assert_eq!(state.error(), None);
}

#[test]
fn public_url_maps_back_to_path() {
    let storage = Rc::new(MemoryStorage::default());
    let service = service(storage);

    assert_eq!(
        service
            .path_from_public_url("https://cdn.test/storage/v1/object/public/public-files/noticias/a.jpg?v=2")
            .as_deref(),
        Some("noticias/a.jpg")
    );
    assert_eq!(service.path_from_public_url("https://otro.sitio/a.jpg"), None);
}

#[test]
fn compressed_image_is_what_gets_stored() {
    let storage = Rc::new(MemoryStorage::default());
    let service = service_with(storage.clone(), Rc::new(WebpCompressor), Rc::new(FixedRandom(0x0a)));
    let state = UploadState::new();
    let options = UploadOptions::images(2).with_folder("obras");

    let uploaded = block_on(service.upload_file(&state, Some(png("plano.png", 4096)), &options)).unwrap();

    assert_eq!(uploaded.path, "obras/1700000000000-0a0b0c0d0e0f.webp");
    let objects = storage.objects.borrow();
    let stored = objects.get("public-files/obras/1700000000000-0a0b0c0d0e0f.webp").unwrap();
    assert_eq!(stored.len(), 1024);
    assert_eq!(&stored[..4], b"RIFF");
    let sent = storage.last_options.borrow().clone().unwrap();
    assert_eq!(sent.content_type, "image/webp");
    assert_eq!(sent.cache_control_seconds, CONFIG.upload_config.cache_control_seconds);
    assert!(!sent.upsert);

    let progress = state.progress();
    assert_eq!(progress.total, 1024);
    assert_eq!(progress.loaded, 1024);
    assert_eq!(progress.percentage, 100);
}

#[test]
fn documents_skip_the_compressor() {
    let storage = Rc::new(MemoryStorage::default());
    let service = service_with(storage.clone(), Rc::new(BrokenCompressor), Rc::new(FixedRandom(0x0a)));
    let state = UploadState::new();
    let mut bytes = b"%PDF-1.7".to_vec();
    bytes.resize(2048, 0);
    let pdf = SelectedFile::new("acta.pdf", "application/pdf", bytes);

    let url = block_on(service.upload(&state, Some(pdf), &UploadOptions::documents(10)));

    assert!(url.unwrap().ends_with(".pdf"));
    assert_eq!(state.error(), None);
}

#[test]
fn compression_failure_is_reported_with_fallback() {
    let storage = Rc::new(MemoryStorage::default());
    let service = service_with(storage.clone(), Rc::new(BrokenCompressor), Rc::new(FixedRandom(0x0a)));
    let state = UploadState::new();

    let url = block_on(service.upload(&state, Some(png("a.png", 2048)), &UploadOptions::images(2)));

    assert_eq!(url, None);
    assert_eq!(state.error().as_deref(), Some("Error al subir el archivo"));
    assert!(!state.is_uploading());
    assert_eq!(storage.calls.get(), 0);
}

#[test]
fn random_source_failure_aborts_before_upload() {
    let storage = Rc::new(MemoryStorage::default());
    let service = service_with(storage.clone(), Rc::new(PassthroughCompressor), Rc::new(BrokenRandom));
    let state = UploadState::new();

    let url = block_on(service.upload(&state, Some(png("a.png", 2048)), &UploadOptions::images(2)));

    assert_eq!(url, None);
    assert_eq!(state.error().as_deref(), Some("Error al subir el archivo"));
    assert!(!state.is_uploading());
    assert_eq!(storage.calls.get(), 0);
}

#[test]
fn custom_name_reduced_to_dots_falls_back_to_generated_name() {
    let storage = Rc::new(MemoryStorage::default());
    let state = UploadState::new();

    for custom in ["./.", ".\\.", "../.."] {
        let options = UploadOptions::images(2).with_folder("noticias").with_custom_name(custom);
        let uploaded = block_on(service(storage.clone()).upload_file(&state, Some(png("x.png", 2048)), &options)).unwrap();

        assert_eq!(uploaded.path, "noticias/1700000000000-0a0b0c0d0e0f.png");
        assert!(!uploaded.path.split('/').any(|segment| segment == ".."));
        storage.objects.borrow_mut().clear();
    }
}
