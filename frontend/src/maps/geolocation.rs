use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::geo::LatLng;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported by your browser")]
    Unsupported,
    #[error("Location permission denied. Please allow access.")]
    PermissionDenied,
    #[error("Unable to fetch current location")]
    Unavailable,
}

/// One-shot high accuracy position fix from the browser.
pub async fn current_position() -> Result<LatLng, GeolocationError> {
    let geolocation = web_sys::window()
        .map(|w| w.navigator())
        .and_then(|n| n.geolocation().ok())
        .ok_or(GeolocationError::Unsupported)?;

    let (tx, rx) = oneshot::channel::<Result<LatLng, GeolocationError>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |position: web_sys::Position| {
            let coords = position.coords();
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(Ok(LatLng::new(coords.latitude(), coords.longitude())));
            }
        }) as Box<dyn FnMut(web_sys::Position)>)
    };

    let on_error = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |error: web_sys::PositionError| {
            let mapped = if error.code() == web_sys::PositionError::PERMISSION_DENIED {
                GeolocationError::PermissionDenied
            } else {
                GeolocationError::Unavailable
            };
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(Err(mapped));
            }
        }) as Box<dyn FnMut(web_sys::PositionError)>)
    };

    let options = web_sys::PositionOptions::new();
    options.set_enable_high_accuracy(true);

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        )
        .map_err(|_| GeolocationError::Unsupported)?;

    let outcome = rx.await.unwrap_or(Err(GeolocationError::Unavailable));
    drop(on_success);
    drop(on_error);
    outcome
}
