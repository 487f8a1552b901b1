use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Coordinate pair in the `{lat, lng}` shape shared by the REST payloads,
/// the realtime events, and the Maps objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn to_js(&self) -> JsValue {
        let obj = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&obj, &"lat".into(), &JsValue::from_f64(self.lat));
        let _ = js_sys::Reflect::set(&obj, &"lng".into(), &JsValue::from_f64(self.lng));
        obj.into()
    }

    /// Display form used by the driver cards, e.g. `Lat: 28.6692, Lng: 77.4538`.
    pub fn display(&self) -> String {
        format!("Lat: {:.4}, Lng: {:.4}", self.lat, self.lng)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trips_lat_lng_keys() {
        let parsed: LatLng = serde_json::from_str(r#"{"lat":28.6692,"lng":77.4538}"#).unwrap();
        assert_eq!(parsed, LatLng::new(28.6692, 77.4538));
        let json = serde_json::to_value(parsed).unwrap();
        assert_eq!(json["lat"], serde_json::json!(28.6692));
        assert_eq!(json["lng"], serde_json::json!(77.4538));
    }

    #[test]
    fn display_rounds_to_four_decimals() {
        let point = LatLng::new(28.66923456, 77.45381234);
        assert_eq!(point.display(), "Lat: 28.6692, Lng: 77.4538");
    }
}
