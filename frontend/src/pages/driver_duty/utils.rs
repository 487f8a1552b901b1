use crate::state::dispatch::BookingOffer;

/// The customer's track page receives one position per tick of this timer
/// while a booking is active.
pub const LOCATION_PUSH_INTERVAL_MS: u32 = 2_000;

/// Shown when another driver takes the booking before this one answers.
pub const OFFER_CLOSED_MESSAGE: &str = "This booking is no longer available";

pub fn duty_label(on_duty: bool) -> &'static str {
    if on_duty {
        "On"
    } else {
        "Off"
    }
}

pub fn duty_toast(on_duty: bool) -> String {
    format!("Duty status updated to {}", duty_label(on_duty))
}

/// Offer popup body. The reverse geocode of the pickup point fills in a
/// readable address; until it resolves the raw coordinates are shown.
pub fn offer_message(offer: &BookingOffer) -> String {
    match &offer.pickup_address {
        Some(address) => format!("Pickup: {address}"),
        None => format!("Pickup: {}", offer.pickup.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::LatLng;

    fn offer(address: Option<&str>) -> BookingOffer {
        BookingOffer {
            booking_id: "bk-1".into(),
            pickup: LatLng::new(28.6692, 77.4538),
            pickup_address: address.map(Into::into),
        }
    }

    #[test]
    fn duty_labels_and_toast_follow_the_flag() {
        assert_eq!(duty_label(true), "On");
        assert_eq!(duty_label(false), "Off");
        assert_eq!(duty_toast(true), "Duty status updated to On");
        assert_eq!(duty_toast(false), "Duty status updated to Off");
    }

    #[test]
    fn offer_message_prefers_the_resolved_address() {
        assert_eq!(
            offer_message(&offer(Some("12 Hospital Road, Ghaziabad"))),
            "Pickup: 12 Hospital Road, Ghaziabad"
        );
    }

    #[test]
    fn offer_message_falls_back_to_coordinates() {
        assert_eq!(
            offer_message(&offer(None)),
            "Pickup: Lat: 28.6692, Lng: 77.4538"
        );
    }
}
