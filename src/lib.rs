// Split-view browser library entry point.
// The tab/split core is plain Rust and tests without a webview toolkit;
// the Tauri shell that hosts it is behind the `desktop` feature.

pub mod error;
pub mod settings;

// Shared payload structs
pub mod state;

// Pure logic modules (no Tauri imports)
pub mod modules;

#[cfg(feature = "desktop")]
pub mod desktop;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    desktop::run()
}
