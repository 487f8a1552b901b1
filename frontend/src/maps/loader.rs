use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::MapsError;
use crate::config;

const MAX_LOAD_ATTEMPTS: u32 = 5;
const RETRY_DELAY_MS: u32 = 1_000;
const SCRIPT_URL_PREFIX: &str = "https://maps.googleapis.com/maps/api/js";

/// True once `window.google.maps` exists.
pub fn api_available() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let google = js_sys::Reflect::get(&window, &"google".into()).unwrap_or(JsValue::UNDEFINED);
    if google.is_undefined() || google.is_null() {
        return false;
    }
    let maps = js_sys::Reflect::get(&google, &"maps".into()).unwrap_or(JsValue::UNDEFINED);
    !(maps.is_undefined() || maps.is_null())
}

/// Injects the Maps script and waits for it, retrying failed loads with a
/// linearly growing delay. Resolves immediately when the API is already
/// present, so every map page can call this on mount.
pub async fn load_maps_script() -> Result<(), MapsError> {
    if api_available() {
        return Ok(());
    }
    let key = config::await_maps_api_key().await;
    if key.is_empty() {
        return Err(MapsError::MissingApiKey);
    }
    let url = format!("{SCRIPT_URL_PREFIX}?key={key}&libraries=places");

    let mut attempt = 1;
    loop {
        match inject_script(&url).await {
            Ok(()) => {
                if api_available() {
                    log::info!("maps script loaded (attempt {attempt})");
                    return Ok(());
                }
                return Err(MapsError::NotInitialized);
            }
            Err(err) if attempt < MAX_LOAD_ATTEMPTS => {
                log::warn!("maps script load failed (attempt {attempt}): {err}");
                TimeoutFuture::new(RETRY_DELAY_MS * attempt).await;
                attempt += 1;
            }
            Err(_) => return Err(MapsError::LoadFailed),
        }
    }
}

async fn inject_script(url: &str) -> Result<(), MapsError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(MapsError::NoBrowserContext)?;

    // A leftover tag from a failed attempt would never fire events again.
    let selector = format!("script[src^='{SCRIPT_URL_PREFIX}']");
    if let Ok(Some(stale)) = document.query_selector(&selector) {
        stale.remove();
    }

    let script: web_sys::HtmlScriptElement = document
        .create_element("script")
        .map_err(|_| MapsError::NoBrowserContext)?
        .dyn_into()
        .map_err(|_| MapsError::NoBrowserContext)?;
    script.set_src(url);
    let _ = script.set_attribute("async", "");
    let _ = script.set_attribute("defer", "");

    let (tx, rx) = oneshot::channel::<bool>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let on_load = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move || {
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(true);
            }
        }) as Box<dyn FnMut()>)
    };
    script.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let on_error = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(false);
            }
        }) as Box<dyn FnMut(web_sys::Event)>)
    };
    script.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let body = document.body().ok_or(MapsError::NoBrowserContext)?;
    body.append_child(&script)
        .map_err(|_| MapsError::NoBrowserContext)?;

    let loaded = rx.await.unwrap_or(false);
    script.set_onload(None);
    script.set_onerror(None);
    drop(on_load);
    drop(on_error);

    if loaded {
        Ok(())
    } else {
        script.remove();
        Err(MapsError::LoadFailed)
    }
}
