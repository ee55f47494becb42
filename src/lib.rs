/// Page Mind - Chrome Extension that summarizes and answers questions about the current page
/// Built with Rust + WASM + Yew

mod backend;
mod config;
mod controller;
mod error;
mod page_context;
mod summary;
mod transcript;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook and logging for the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let config = config::PopupConfig::from_build_env();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
}

// Re-export summary formatting for JavaScript access
#[wasm_bindgen]
pub fn format_summary_html(summary: &str) -> String {
    summary::format_summary(summary).to_html()
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
