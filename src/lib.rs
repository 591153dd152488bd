use wasm_bindgen::prelude::*;

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod format_utils;
pub mod infrastructure;
pub mod presentation;

/// Runs once when the module loads; the page itself starts via `startDashboard`.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
}
