mod api;
mod app;
mod components;
mod config;
mod crud;
mod forms;
mod models;
mod pages;
mod refresh;
mod session;
mod state;
mod storage;
mod util;
mod validate;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    mount_to_body(app::App);
}
