use serde::{Deserialize, Serialize};

use crate::maps::LatLng;

/// Driver identity attached to an accepted booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDetails {
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<LatLng>,
}

/// Events this client emits to the dispatch server. Serialized as an
/// `{"event": ..., "data": ...}` envelope with camelCase event names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    NewBooking {
        booking_id: String,
        pickup_coordinates: LatLng,
    },
    /// The payload is the bare driver id, not an object.
    RegisterDriver(String),
    #[serde(rename_all = "camelCase")]
    AcceptBooking {
        booking_id: String,
        driver_id: String,
        driver_details: DriverDetails,
    },
    #[serde(rename_all = "camelCase")]
    SkipBooking {
        booking_id: String,
        driver_id: String,
    },
    #[serde(rename_all = "camelCase")]
    DriverLocation {
        driver_id: String,
        coordinates: LatLng,
    },
    #[serde(rename_all = "camelCase")]
    DriverReached {
        booking_id: String,
        driver_id: String,
    },
    #[serde(rename_all = "camelCase")]
    JoinBooking { booking_id: String },
}

impl ClientEvent {
    pub fn to_wire(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Event name as it appears on the wire, for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::NewBooking { .. } => "newBooking",
            ClientEvent::RegisterDriver(_) => "registerDriver",
            ClientEvent::AcceptBooking { .. } => "acceptBooking",
            ClientEvent::SkipBooking { .. } => "skipBooking",
            ClientEvent::DriverLocation { .. } => "driverLocation",
            ClientEvent::DriverReached { .. } => "driverReached",
            ClientEvent::JoinBooking { .. } => "joinBooking",
        }
    }
}

/// Events the dispatch server pushes to this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    BookingNotification {
        booking_id: String,
        pickup_coordinates: LatLng,
    },
    #[serde(rename_all = "camelCase")]
    CloseBookingPopup { booking_id: String },
    #[serde(rename_all = "camelCase")]
    DriverAccepted {
        booking_id: String,
        driver_id: String,
        driver_details: DriverDetails,
    },
    DriverLocationUpdate { coordinates: LatLng },
    #[serde(rename_all = "camelCase")]
    DriverReached {
        booking_id: String,
        driver_id: String,
    },
    Error { message: String },
}

impl ServerEvent {
    pub fn from_wire(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_booking_serializes_with_camel_case_envelope() {
        let event = ClientEvent::NewBooking {
            booking_id: "bk-1".into(),
            pickup_coordinates: LatLng::new(28.67, 77.45),
        };
        let value: serde_json::Value = serde_json::from_str(&event.to_wire().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "newBooking",
                "data": {
                    "bookingId": "bk-1",
                    "pickupCoordinates": {"lat": 28.67, "lng": 77.45}
                }
            })
        );
    }

    #[test]
    fn register_driver_payload_is_a_bare_string() {
        let event = ClientEvent::RegisterDriver("drv-9".into());
        let value: serde_json::Value = serde_json::from_str(&event.to_wire().unwrap()).unwrap();
        assert_eq!(value, json!({"event": "registerDriver", "data": "drv-9"}));
    }

    #[test]
    fn accept_booking_nests_driver_details() {
        let event = ClientEvent::AcceptBooking {
            booking_id: "bk-1".into(),
            driver_id: "drv-9".into(),
            driver_details: DriverDetails {
                name: "Asha".into(),
                coordinates: Some(LatLng::new(1.0, 2.0)),
            },
        };
        let value: serde_json::Value = serde_json::from_str(&event.to_wire().unwrap()).unwrap();
        assert_eq!(value["data"]["driverDetails"]["name"], json!("Asha"));
        assert_eq!(value["data"]["driverDetails"]["coordinates"]["lng"], json!(2.0));
    }

    #[test]
    fn decodes_booking_notification() {
        let text = r#"{"event":"bookingNotification","data":{"bookingId":"bk-2","pickupCoordinates":{"lat":12.9,"lng":77.6}}}"#;
        let event = ServerEvent::from_wire(text).unwrap();
        assert_eq!(
            event,
            ServerEvent::BookingNotification {
                booking_id: "bk-2".into(),
                pickup_coordinates: LatLng::new(12.9, 77.6),
            }
        );
    }

    #[test]
    fn decodes_location_update_without_driver_id() {
        let text = r#"{"event":"driverLocationUpdate","data":{"coordinates":{"lat":0.5,"lng":1.5}}}"#;
        let event = ServerEvent::from_wire(text).unwrap();
        assert_eq!(
            event,
            ServerEvent::DriverLocationUpdate {
                coordinates: LatLng::new(0.5, 1.5),
            }
        );
    }

    #[test]
    fn decodes_driver_accepted_without_coordinates() {
        let text = r#"{"event":"driverAccepted","data":{"bookingId":"bk-3","driverId":"drv-1","driverDetails":{"name":"Ravi"}}}"#;
        let event = ServerEvent::from_wire(text).unwrap();
        match event {
            ServerEvent::DriverAccepted { driver_details, .. } => {
                assert_eq!(driver_details.name, "Ravi");
                assert_eq!(driver_details.coordinates, None);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_event_names() {
        let text = r#"{"event":"somethingElse","data":{}}"#;
        assert!(ServerEvent::from_wire(text).is_err());
    }
}
