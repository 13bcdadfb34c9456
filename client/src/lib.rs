//! # client
//!
//! Leptos + WASM front end for the TokenLab service marketplace.
//!
//! This crate contains the routed pages (catalogue, detail, registration
//! form, Alith playground), shared components, page state, and the REST
//! client for the backend under `/api/v1`. The host binary renders it on the
//! server; the `hydrate` feature builds the browser bundle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: wires console logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
