use crate::models::FileUpload;
use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// The first file picked in an `<input type="file">`, if any.
pub(crate) fn first_selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Read a picked file fully into memory. `None` if the browser refuses.
pub(crate) async fn read_file(file: web_sys::File) -> Option<FileUpload> {
    let buf = JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = Uint8Array::new(&buf).to_vec();
    Some(FileUpload::new(file.name(), file.type_(), bytes))
}

/// Human-readable byte count for attachment hints.
pub(crate) fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}
