// Lectura de web_sys::File a memoria

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};
use crate::models::SelectedFile;

/// Primer archivo del <input type="file"> que disparó el evento
pub fn first_file_from_event(event: &Event) -> Option<File> {
    let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

pub async fn read_selected_file(file: &File) -> Result<SelectedFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Error leyendo archivo: {:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    log::debug!("📄 Archivo leído: {} ({} bytes, {})", file.name(), bytes.len(), file.type_());

    Ok(SelectedFile::new(file.name(), file.type_(), bytes))
}
