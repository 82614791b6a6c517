/// Save to Pocket - Chrome Extension that saves the active tab to Pocket
/// Built with Rust + WASM + Yew

pub mod api;
pub mod auth;
pub mod browser;
pub mod config;
pub mod credentials;
pub mod error;
pub mod flow;
pub mod items;
pub mod tabs;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::SaveError;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the toolbar popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::PopupApp>::new().render();
}

// Start the Yew app for the OAuth redirect page
#[wasm_bindgen]
pub fn start_auth_callback() {
    yew::Renderer::<ui::auth_callback::AuthCallbackApp>::new().render();
}
