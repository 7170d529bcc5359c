//! # client
//!
//! Leptos + WASM single-page client for the Mural forum.
//!
//! This crate contains routes, pages, and components. Session state, the HTTP
//! adapter, and the route-guard decision come from the `session` crate; this
//! crate supplies the browser pieces (`gloo-net` transport, `localStorage`
//! token storage) and renders the views.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(error) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console logging unavailable: {error}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
