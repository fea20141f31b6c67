//! PollVerse Front-end
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! It reaches the poll contract through the wallet injected at
//! `window.ethereum`; there is no backend.

use leptos::*;
use pollverse::config::Config;

mod app;
mod components;
mod logging;
mod pages;
mod state;

const EMBEDDED_CONFIG: &str = include_str!("../pollverse.toml");

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let config = Config::from_toml_str(EMBEDDED_CONFIG).unwrap_or_else(|e| {
        web_sys::console::error_1(&format!("Invalid embedded config: {}", e).into());
        Config::default()
    });

    logging::init(&config.logging);
    tracing::info!("PollVerse v{}", env!("CARGO_PKG_VERSION"));

    mount_to_body(move || view! { <app::App config=config /> });
}
