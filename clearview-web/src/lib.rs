#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod bridge;
pub mod components;
pub mod controls;
pub mod dom;
pub mod enhance;
pub mod keyboard;
pub mod storage;
pub mod surface;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Render saved preferences before any control can be pressed
    let _ = app::boot();
}
