use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::realtime::DriverDetails;

/// Route recalculation waits this long after the last location change.
pub const ROUTE_DEBOUNCE_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingKind {
    #[default]
    Emergency,
    NonEmergency,
}

impl BookingKind {
    pub fn label(&self) -> &'static str {
        match self {
            BookingKind::Emergency => "Emergency",
            BookingKind::NonEmergency => "Non-Emergency",
        }
    }
}

/// Base fare plus a per-kilometer rate, steeper for emergency runs.
pub fn fare_for(kind: BookingKind, distance_km: f64) -> f64 {
    match kind {
        BookingKind::Emergency => 5.0 + distance_km * 2.0,
        BookingKind::NonEmergency => 3.0 + distance_km * 1.5,
    }
}

pub fn format_fare(fare: f64) -> String {
    format!("${fare:.2}")
}

/// Kilometers out of a directions leg's distance text such as `12.4 km`.
/// Mirrors a leading-prefix float parse, so anything unparsable counts as
/// zero rather than failing the quote.
pub fn parse_distance_km(text: &str) -> f64 {
    let cleaned = text.trim().replace(" km", "");
    let numeric: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse().unwrap_or(0.0)
}

pub fn validate_submission(pickup: &str, dropoff: &str, route_ready: bool) -> Result<(), String> {
    if pickup.trim().is_empty() || dropoff.trim().is_empty() {
        return Err("Please enter both pickup and drop-off locations".to_string());
    }
    if !route_ready {
        return Err("Please wait for route calculation to complete".to_string());
    }
    Ok(())
}

/// Link the customer follows once a driver accepts. The tracking page shares
/// no in-memory state with this one, so everything it needs rides in the
/// query string.
pub fn track_driver_href(booking_id: &str, driver: &DriverDetails) -> String {
    let mut href = format!(
        "/track-driver?bookingId={}&driverName={}",
        utf8_percent_encode(booking_id, NON_ALPHANUMERIC),
        utf8_percent_encode(&driver.name, NON_ALPHANUMERIC),
    );
    if let Some(coordinates) = driver.coordinates {
        href.push_str(&format!("&lat={}&lng={}", coordinates.lat, coordinates.lng));
    }
    href
}
