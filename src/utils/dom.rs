//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use js_sys::{Object, Reflect};
use wasm_bindgen::JsCast;
use web_sys::{Storage, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Page origin, e.g. `https://app.example.org`.
pub fn origin() -> String {
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Read a global property from `window` as an object.
pub fn global_object(name: &str) -> Option<Object> {
    let window = window()?;
    Reflect::get(&window, &name.into())
        .ok()
        .and_then(|v| v.dyn_into::<Object>().ok())
}

