use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

pub mod geo;
pub mod geolocation;
pub mod js;
pub mod loader;

pub use geo::LatLng;
pub use geolocation::{current_position, GeolocationError};
pub use loader::load_maps_script;

pub const DRIVER_MARKER_ICON: &str = "http://maps.google.com/mapfiles/ms/icons/green-dot.png";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapsError {
    #[error("Map initialization failed: Google Maps API key is not configured")]
    MissingApiKey,
    #[error("Failed to load Google Maps script after retries")]
    LoadFailed,
    #[error("Google Maps API failed to initialize")]
    NotInitialized,
    #[error("Map initialization failed: Container not found")]
    ContainerNotFound,
    #[error("Browser document is unavailable")]
    NoBrowserContext,
    #[error("No route found between the selected locations")]
    NoRoute,
    #[error("Geocoding request failed")]
    GeocodeFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub distance_text: String,
    pub duration_text: String,
}

pub fn new_map(container: &web_sys::HtmlElement, center: LatLng, zoom: u32) -> js::Map {
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"zoom".into(), &JsValue::from_f64(zoom as f64));
    let _ = js_sys::Reflect::set(&options, &"center".into(), &center.to_js());
    js::Map::new(container, &options.into())
}

/// Places a marker on the map, with the shared green dot icon when
/// `icon_url` is given.
pub fn new_marker(
    map: &js::Map,
    position: LatLng,
    title: &str,
    icon_url: Option<&str>,
) -> js::Marker {
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"position".into(), &position.to_js());
    let _ = js_sys::Reflect::set(&options, &"map".into(), map.as_ref());
    let _ = js_sys::Reflect::set(&options, &"title".into(), &title.into());
    if let Some(url) = icon_url {
        let icon = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&icon, &"url".into(), &url.into());
        let _ = js_sys::Reflect::set(&options, &"icon".into(), &icon.into());
    }
    js::Marker::new(&options.into())
}

/// Renderer wired to a map and an optional directions panel element.
pub fn new_directions_renderer(
    map: &js::Map,
    panel: Option<&web_sys::HtmlElement>,
) -> js::DirectionsRenderer {
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"map".into(), map.as_ref());
    if let Some(panel) = panel {
        let _ = js_sys::Reflect::set(&options, &"panel".into(), panel.as_ref());
    }
    js::DirectionsRenderer::new(&options.into())
}

/// Routes between two free-form addresses, draws the result on the
/// renderer, and returns the first leg's distance and duration texts.
pub async fn compute_route(
    service: &js::DirectionsService,
    renderer: &js::DirectionsRenderer,
    origin: &str,
    destination: &str,
) -> Result<RouteSummary, MapsError> {
    let request = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&request, &"origin".into(), &origin.into());
    let _ = js_sys::Reflect::set(&request, &"destination".into(), &destination.into());
    let _ = js_sys::Reflect::set(&request, &"travelMode".into(), &"DRIVING".into());

    let result = JsFuture::from(service.route(&request.into()))
        .await
        .map_err(|_| MapsError::NoRoute)?;
    renderer.set_directions(&result);

    let first_leg = get_path(&result, &["routes"])
        .and_then(|routes| first_element(&routes))
        .and_then(|route| get_path(&route, &["legs"]))
        .and_then(|legs| first_element(&legs))
        .ok_or(MapsError::NoRoute)?;

    let distance_text = get_path(&first_leg, &["distance", "text"])
        .and_then(|value| value.as_string())
        .ok_or(MapsError::NoRoute)?;
    let duration_text = get_path(&first_leg, &["duration", "text"])
        .and_then(|value| value.as_string())
        .unwrap_or_default();

    Ok(RouteSummary {
        distance_text,
        duration_text,
    })
}

/// Attaches a places autocomplete to a text input. The callback receives the
/// formatted address of each place the user picks. The returned widget and
/// its listener live as long as the input does.
pub fn attach_autocomplete(
    input: &web_sys::HtmlInputElement,
    fields: &[&str],
    on_address: impl Fn(String) + 'static,
) -> js::Autocomplete {
    let autocomplete = js::Autocomplete::new(input);
    let field_list = js_sys::Array::new();
    for field in fields {
        field_list.push(&JsValue::from_str(field));
    }
    autocomplete.set_fields(&field_list.into());

    let widget = autocomplete.clone();
    let callback = Closure::wrap(Box::new(move || {
        let place = widget.get_place();
        if let Some(address) =
            get_path(&place, &["formatted_address"]).and_then(|value| value.as_string())
        {
            if !address.is_empty() {
                on_address(address);
            }
        }
    }) as Box<dyn FnMut()>);
    autocomplete.add_listener("place_changed", callback.as_ref().unchecked_ref());
    callback.forget();
    autocomplete
}

/// Forward geocode of a free-form address to coordinates.
pub async fn geocode_address(address: &str) -> Result<LatLng, MapsError> {
    let request = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&request, &"address".into(), &address.into());
    let result = run_geocode(request.into()).await?;
    let location =
        get_path(&result, &["geometry", "location"]).ok_or(MapsError::GeocodeFailed)?;
    let location: js::JsLatLng = location.unchecked_into();
    Ok(LatLng::new(location.lat(), location.lng()))
}

/// Reverse geocode of coordinates to the first formatted address.
pub async fn reverse_geocode(position: LatLng) -> Result<String, MapsError> {
    let request = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&request, &"location".into(), &position.to_js());
    let result = run_geocode(request.into()).await?;
    get_path(&result, &["formatted_address"])
        .and_then(|value| value.as_string())
        .ok_or(MapsError::GeocodeFailed)
}

async fn run_geocode(request: JsValue) -> Result<JsValue, MapsError> {
    let geocoder = js::Geocoder::new();
    let (tx, rx) = oneshot::channel::<Option<JsValue>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let callback = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |results: JsValue, status: JsValue| {
            let first = if status.as_string().as_deref() == Some("OK") {
                first_element(&results)
            } else {
                None
            };
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(first);
            }
        }) as Box<dyn FnMut(JsValue, JsValue)>)
    };
    geocoder.geocode(&request, callback.as_ref().unchecked_ref());

    let first = rx.await.ok().flatten();
    drop(callback);
    first.ok_or(MapsError::GeocodeFailed)
}

fn first_element(value: &JsValue) -> Option<JsValue> {
    let array = js_sys::Array::from(value);
    if array.length() > 0 {
        Some(array.get(0))
    } else {
        None
    }
}

fn get_path(value: &JsValue, keys: &[&str]) -> Option<JsValue> {
    let mut current = value.clone();
    for key in keys {
        current = js_sys::Reflect::get(&current, &(*key).into()).ok()?;
        if current.is_undefined() || current.is_null() {
            return None;
        }
    }
    Some(current)
}
