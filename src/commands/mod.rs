//! Browser Bindings
//!
//! Thin wrappers over the browser APIs the applets need, organized by concern.
//! Every wrapper returns `Result<_, String>` and leaves logging to the caller.

mod storage;
mod files;
mod dialog;

use wasm_bindgen::prelude::*;

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "no window".to_string())
}

// Re-export all public items
pub use storage::*;
pub use files::*;
pub use dialog::*;
