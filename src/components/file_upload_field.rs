// ============================================================================
// FILE UPLOAD FIELD COMPONENT - Campo de formulario con subida al storage
// ============================================================================

use yew::prelude::*;
use crate::hooks::{use_file_upload, UploadRequest};
use crate::models::UploadOptions;
use crate::services::UploadedFile;
use crate::utils::file_reader::{first_file_from_event, read_selected_file};

#[derive(Properties, PartialEq, Clone)]
pub struct FileUploadFieldProps {
    pub label: AttrValue,
    pub options: UploadOptions,
    /// URL pública actual del campo
    #[prop_or_default]
    pub value: Option<String>,
    pub on_change: Callback<Option<String>>,
    #[prop_or_default]
    pub accept: Option<AttrValue>,
    /// Comprimir imágenes antes de subir
    #[prop_or(true)]
    pub compress: bool,
}

#[function_component(FileUploadField)]
pub fn file_upload_field(props: &FileUploadFieldProps) -> Html {
    let handle = use_file_upload(props.compress);

    let accept = props.accept.clone().or_else(|| {
        props
            .options
            .allowed_types
            .as_ref()
            .map(|types| AttrValue::from(types.join(",")))
    });

    let on_select = {
        let upload = handle.upload.clone();
        let report_error = handle.report_error.clone();
        let options = props.options.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let Some(file) = first_file_from_event(&e) else {
                return;
            };
            let upload = upload.clone();
            let report_error = report_error.clone();
            let options = options.clone();
            let on_complete = {
                let on_change = on_change.clone();
                Callback::from(move |uploaded: Option<UploadedFile>| {
                    if let Some(uploaded) = uploaded {
                        on_change.emit(Some(uploaded.public_url));
                    }
                })
            };
            wasm_bindgen_futures::spawn_local(async move {
                match read_selected_file(&file).await {
                    Ok(selected) => upload.emit(UploadRequest {
                        file: Some(selected),
                        options,
                        on_complete,
                    }),
                    Err(e) => {
                        log::error!("❌ {}", e);
                        report_error.emit("No se pudo leer el archivo".to_string());
                    }
                }
            });
        })
    };

    let on_remove = {
        let delete_file = handle.delete_file.clone();
        let reset = handle.reset.clone();
        let service = handle.service.clone();
        let value = props.value.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(url) = value.as_deref() else {
                return;
            };
            let cleared = {
                let reset = reset.clone();
                let on_change = on_change.clone();
                Callback::from(move |_| {
                    reset.emit(());
                    on_change.emit(None);
                })
            };
            match service.path_from_public_url(url) {
                Some(path) => {
                    let on_deleted = Callback::from(move |deleted: bool| {
                        if deleted {
                            cleared.emit(());
                        }
                    });
                    delete_file.emit((path, on_deleted));
                }
                // URL externa al bucket: solo se desvincula
                None => cleared.emit(()),
            }
        })
    };

    let percentage = handle.progress.percentage;

    html! {
        <div class={classes!("file-upload-field", handle.uploading.then_some("uploading"))}>
            <label class="file-upload-label">
                {props.label.clone()}
                <input
                    type="file"
                    accept={accept}
                    disabled={handle.uploading}
                    onchange={on_select}
                />
            </label>

            if handle.uploading {
                <div class="file-upload-progress">
                    <progress max="100" value={percentage.to_string()} />
                    <span>{format!("{}%", percentage)}</span>
                </div>
            }

            if let Some(url) = props.value.clone() {
                <div class="file-upload-current">
                    <a href={url.clone()} target="_blank" rel="noopener">{url}</a>
                    <button
                        type="button"
                        class="file-upload-remove"
                        disabled={handle.uploading}
                        onclick={on_remove}
                    >
                        {"Quitar"}
                    </button>
                </div>
            }

            if let Some(error) = handle.error.clone() {
                <p class="file-upload-error">{"⚠️ "}{error}</p>
            }
        </div>
    }
}
