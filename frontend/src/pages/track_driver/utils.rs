use crate::maps::LatLng;

/// Everything the tracking page needs arrives in the query string; the
/// booking page hands over no in-memory state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackQuery {
    pub booking_id: Option<String>,
    pub driver_name: Option<String>,
    /// Drawn immediately while waiting for the first live update. Present
    /// only when both `lat` and `lng` parse.
    pub initial_position: Option<LatLng>,
}

pub fn parse_track_query(get: impl Fn(&str) -> Option<String>) -> TrackQuery {
    let lat = get("lat").and_then(|value| value.parse::<f64>().ok());
    let lng = get("lng").and_then(|value| value.parse::<f64>().ok());
    TrackQuery {
        booking_id: get("bookingId").filter(|value| !value.is_empty()),
        driver_name: get("driverName").filter(|value| !value.is_empty()),
        initial_position: match (lat, lng) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        },
    }
}

pub fn display_name(query: &TrackQuery) -> String {
    query
        .driver_name
        .clone()
        .unwrap_or_else(|| "Driver".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn query(pairs: &[(&str, &str)]) -> TrackQuery {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        parse_track_query(|key| map.get(key).cloned())
    }

    #[test]
    fn parses_a_complete_handoff() {
        let parsed = query(&[
            ("bookingId", "bk-1"),
            ("driverName", "John Smith"),
            ("lat", "28.6692"),
            ("lng", "77.4538"),
        ]);
        assert_eq!(parsed.booking_id.as_deref(), Some("bk-1"));
        assert_eq!(parsed.driver_name.as_deref(), Some("John Smith"));
        assert_eq!(parsed.initial_position, Some(LatLng::new(28.6692, 77.4538)));
    }

    #[test]
    fn a_half_parsed_coordinate_pair_is_dropped() {
        let parsed = query(&[("bookingId", "bk-1"), ("lat", "28.6692")]);
        assert_eq!(parsed.initial_position, None);

        let parsed = query(&[("lat", "not-a-number"), ("lng", "77.45")]);
        assert_eq!(parsed.initial_position, None);
    }

    #[test]
    fn empty_values_count_as_missing() {
        let parsed = query(&[("bookingId", ""), ("driverName", "")]);
        assert_eq!(parsed.booking_id, None);
        assert_eq!(parsed.driver_name, None);
    }

    #[test]
    fn the_display_name_falls_back_generically() {
        assert_eq!(display_name(&TrackQuery::default()), "Driver");
        assert_eq!(
            display_name(&query(&[("driverName", "Asha")])),
            "Asha"
        );
    }
}
