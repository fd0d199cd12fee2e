mod app;
mod components;
mod config;
mod core;
mod models;
mod utils;

use app::{App, ConfigErrorScreen};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::core::{ConnectorConfig, Environment};

fn main() {
    console_error_panic_hook::set_once();

    let root = document()
        .get_element_by_id("app")
        .expect("Failed to find #app element")
        .unchecked_into::<web_sys::HtmlElement>();

    // Configuration is resolved exactly once; an invalid build never mounts the app.
    match ConnectorConfig::from_environment(&Environment::from_build()) {
        Ok(config) => {
            web_sys::console::info_1(
                &format!(
                    "wallet config: default chain {} ({}), {} optional",
                    config.default_chain(),
                    config.default_chain().name(),
                    config.optional_chains.len()
                )
                .into(),
            );
            mount_to(root, move || view! { <App config=config /> }).forget();
        }
        Err(error) => {
            web_sys::console::error_1(&format!("startup aborted: {error}").into());
            mount_to(root, move || view! { <ConfigErrorScreen error=error /> }).forget();
        }
    }
}
