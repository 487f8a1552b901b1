mod api;
mod components;
pub mod config;
mod maps;
mod pages;
mod realtime;
pub mod router;
mod state;
mod test_support;
pub mod utils;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);
    log::info!("starting ambulance tracker frontend");

    // Runtime config load from ./config.json finishes before the app
    // mounts; window.__AMBUTRACK_ENV (env.js) takes precedence when set.
    leptos::spawn_local(async move {
        config::init().await;
        log::debug!("runtime config initialized");
        router::mount_app();
    });
}
