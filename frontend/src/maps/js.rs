//! Raw bindings to the pieces of the Maps JavaScript API the app uses.
//! Higher level helpers live in the parent module.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type Map;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
    pub fn new(container: &web_sys::HtmlElement, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = panTo)]
    pub fn pan_to(this: &Map, center: &JsValue);

    #[wasm_bindgen(method, js_name = setCenter)]
    pub fn set_center(this: &Map, center: &JsValue);

    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type Marker;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
    pub fn new(options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = setPosition)]
    pub fn set_position(this: &Marker, position: &JsValue);

    /// Pass the map to attach, or `JsValue::NULL` to remove the marker.
    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &Marker, map: &JsValue);

    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type Geocoder;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
    pub fn new() -> Geocoder;

    #[wasm_bindgen(method)]
    pub fn geocode(this: &Geocoder, request: &JsValue, callback: &js_sys::Function);

    #[derive(Clone)]
    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type DirectionsService;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
    pub fn new() -> DirectionsService;

    #[wasm_bindgen(method)]
    pub fn route(this: &DirectionsService, request: &JsValue) -> js_sys::Promise;

    #[derive(Clone)]
    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type DirectionsRenderer;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
    pub fn new(options: &JsValue) -> DirectionsRenderer;

    #[wasm_bindgen(method, js_name = setDirections)]
    pub fn set_directions(this: &DirectionsRenderer, directions: &JsValue);

    #[derive(Clone)]
    #[wasm_bindgen(js_namespace = ["google", "maps", "places"])]
    pub type Autocomplete;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps", "places"])]
    pub fn new(input: &web_sys::HtmlInputElement) -> Autocomplete;

    #[wasm_bindgen(method, js_name = setFields)]
    pub fn set_fields(this: &Autocomplete, fields: &JsValue);

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(this: &Autocomplete, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = getPlace)]
    pub fn get_place(this: &Autocomplete) -> JsValue;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = LatLng)]
    pub type JsLatLng;

    #[wasm_bindgen(method)]
    pub fn lat(this: &JsLatLng) -> f64;

    #[wasm_bindgen(method)]
    pub fn lng(this: &JsLatLng) -> f64;
}
