// ============================================================================
// COMPRESIÓN DE IMÁGENES - Reescala y re-codifica antes de subir
// ============================================================================
// En wasm32 se usa un <canvas>; fuera del navegador las imágenes pasan igual.
// ============================================================================

use async_trait::async_trait;
use base64::Engine;
use crate::models::SelectedFile;
use crate::utils::file_signature::preferred_extension;

#[async_trait(?Send)]
pub trait ImageCompressor {
    async fn compress(&self, file: SelectedFile) -> Result<SelectedFile, String>;
}

/// No toca los bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCompressor;

#[async_trait(?Send)]
impl ImageCompressor for PassthroughCompressor {
    async fn compress(&self, file: SelectedFile) -> Result<SelectedFile, String> {
        Ok(file)
    }
}

/// Formatos que el canvas puede re-codificar sin perder nada esencial
/// (GIF animados y SVG quedan fuera)
pub fn is_compressible(mime: &str) -> bool {
    matches!(mime, "image/jpeg" | "image/png" | "image/webp")
}

/// Dimensiones escaladas para que el lado mayor no pase de `max_dimension`
pub fn scaled_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension || longest == 0 {
        return (width, height);
    }
    let ratio = max_dimension as f64 / longest as f64;
    let w = ((width as f64 * ratio).round() as u32).max(1);
    let h = ((height as f64 * ratio).round() as u32).max(1);
    (w, h)
}

/// `data:<mime>;base64,<datos>` -> (mime, bytes)
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>), String> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or("Data URL inválida: falta prefijo")?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or("Data URL inválida: falta separador")?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or("Data URL inválida: no es base64")?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| format!("Error decodificando imagen: {}", e))?;

    Ok((mime.to_string(), bytes))
}

/// Construye el archivo comprimido; si no mejora el tamaño se queda el original
pub fn pick_smaller(original: SelectedFile, mime: String, bytes: Vec<u8>) -> SelectedFile {
    if bytes.is_empty() || bytes.len() >= original.bytes.len() {
        log::debug!("🖼️ Compresión sin ganancia para {}, se mantiene el original", original.name);
        return original;
    }

    let name = if mime == original.declared_type {
        original.name.clone()
    } else {
        let stem = original
            .name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(original.name.as_str());
        format!("{}.{}", stem, preferred_extension(&mime).unwrap_or("bin"))
    };

    log::info!(
        "🖼️ Imagen comprimida: {} -> {} bytes ({})",
        original.bytes.len(),
        bytes.len(),
        mime
    );

    SelectedFile::new(name, mime, bytes)
}

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasCompressor;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use super::*;
    use crate::config::CONFIG;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, ImageBitmap};

    /// Compresor con <canvas> del navegador
    #[derive(Debug, Clone, Copy)]
    pub struct CanvasCompressor {
        pub max_dimension: u32,
        pub quality: f64,
    }

    impl CanvasCompressor {
        pub fn from_config() -> Self {
            Self {
                max_dimension: CONFIG.upload_config.image_max_dimension,
                quality: CONFIG.upload_config.image_quality,
            }
        }

        async fn render(&self, file: &SelectedFile) -> Result<String, String> {
            let js_err = |e: JsValue| format!("{:?}", e);

            let window = web_sys::window().ok_or("No hay window")?;
            let document = window.document().ok_or("No hay document")?;

            let parts = js_sys::Array::new();
            parts.push(&js_sys::Uint8Array::from(file.bytes.as_slice()));
            let blob_options = BlobPropertyBag::new();
            blob_options.set_type(&file.declared_type);
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &blob_options)
                .map_err(js_err)?;

            let bitmap: ImageBitmap = JsFuture::from(window.create_image_bitmap_with_blob(&blob).map_err(js_err)?)
                .await
                .map_err(js_err)?
                .dyn_into()
                .map_err(|_| "No se pudo decodificar la imagen".to_string())?;

            let (width, height) = scaled_size(bitmap.width(), bitmap.height(), self.max_dimension);

            let canvas: HtmlCanvasElement = document
                .create_element("canvas")
                .map_err(js_err)?
                .dyn_into()
                .map_err(|_| "No se pudo crear el canvas".to_string())?;
            canvas.set_width(width);
            canvas.set_height(height);

            let context: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .map_err(js_err)?
                .ok_or("Canvas sin contexto 2d")?
                .dyn_into()
                .map_err(|_| "Contexto 2d inválido".to_string())?;

            context
                .draw_image_with_image_bitmap_and_dw_and_dh(&bitmap, 0.0, 0.0, width as f64, height as f64)
                .map_err(js_err)?;
            bitmap.close();

            canvas
                .to_data_url_with_type_and_encoder_options(&file.declared_type, &JsValue::from_f64(self.quality))
                .map_err(js_err)
        }
    }

    #[async_trait(?Send)]
    impl ImageCompressor for CanvasCompressor {
        async fn compress(&self, file: SelectedFile) -> Result<SelectedFile, String> {
            if !is_compressible(&file.declared_type) {
                return Ok(file);
            }
            let data_url = self.render(&file).await?;
            let (mime, bytes) = decode_data_url(&data_url)?;
            Ok(pick_smaller(file, mime, bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_raster_formats_are_compressible() {
        assert!(is_compressible("image/jpeg"));
        assert!(is_compressible("image/webp"));
        assert!(!is_compressible("image/gif"));
        assert!(!is_compressible("image/svg+xml"));
        assert!(!is_compressible("application/pdf"));
    }

    #[test]
    fn scaling_keeps_aspect_ratio() {
        assert_eq!(scaled_size(4000, 2000, 1920), (1920, 960));
        assert_eq!(scaled_size(1000, 3000, 1500), (500, 1500));
        assert_eq!(scaled_size(800, 600, 1920), (800, 600));
    }

    #[test]
    fn data_url_roundtrip() {
        let (mime, bytes) = decode_data_url("data:image/png;base64,iVBORw==").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![0x89, 0x50, 0x4E, 0x47]);
        assert!(decode_data_url("image/png;base64,AAAA").is_err());
        assert!(decode_data_url("data:image/png,AAAA").is_err());
    }

    #[test]
    fn larger_result_keeps_original() {
        let original = SelectedFile::new("a.png", "image/png", vec![1, 2, 3]);
        let kept = pick_smaller(original.clone(), "image/png".into(), vec![1, 2, 3, 4]);
        assert_eq!(kept, original);
    }

    #[test]
    fn format_change_renames_extension() {
        let original = SelectedFile::new("foto.webp", "image/webp", vec![0; 100]);
        let out = pick_smaller(original, "image/png".into(), vec![0; 10]);
        assert_eq!(out.name, "foto.png");
        assert_eq!(out.declared_type, "image/png");
    }

    #[test]
    fn passthrough_returns_same_file() {
        let file = SelectedFile::new("a.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
        let out = futures::executor::block_on(PassthroughCompressor.compress(file.clone())).unwrap();
        assert_eq!(out, file);
    }
}
