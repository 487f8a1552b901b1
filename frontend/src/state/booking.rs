use crate::realtime::DriverDetails;

/// Route and fare figures shown once the directions lookup succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuote {
    pub distance_text: String,
    pub duration_text: String,
    pub fare: f64,
}

/// Customer booking lifecycle. One variant at a time replaces the scattered
/// distance/driver/reached fields the flow would otherwise juggle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BookingPhase {
    #[default]
    Idle,
    LocationsEntered,
    RouteComputed {
        quote: RouteQuote,
    },
    Submitted {
        booking_id: String,
        quote: RouteQuote,
    },
    DriverAssigned {
        booking_id: String,
        driver: DriverDetails,
    },
    Arrived {
        booking_id: String,
        driver: DriverDetails,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    /// Fired whenever either location input settles; `both_present` is true
    /// when pickup and drop-off are both non-empty.
    LocationsChanged { both_present: bool },
    RouteComputed { quote: RouteQuote },
    RouteFailed,
    Submitted { booking_id: String },
    DriverAccepted {
        booking_id: String,
        driver: DriverDetails,
    },
    DriverReached { booking_id: String },
    Reset,
}

impl BookingPhase {
    pub fn is_submittable(&self) -> bool {
        matches!(self, BookingPhase::RouteComputed { .. })
    }

    pub fn quote(&self) -> Option<&RouteQuote> {
        match self {
            BookingPhase::RouteComputed { quote } => Some(quote),
            BookingPhase::Submitted { quote, .. } => Some(quote),
            _ => None,
        }
    }

    pub fn assigned_driver(&self) -> Option<&DriverDetails> {
        match self {
            BookingPhase::DriverAssigned { driver, .. } => Some(driver),
            BookingPhase::Arrived { driver, .. } => Some(driver),
            _ => None,
        }
    }
}

/// Single transition function for the customer booking flow. Events that do
/// not apply to the current phase leave it unchanged, which is what makes a
/// repeated `driverAccepted` for the same booking a no-op.
pub fn advance(phase: BookingPhase, event: BookingEvent) -> BookingPhase {
    use BookingEvent as E;
    use BookingPhase as P;

    match (phase, event) {
        // Form edits only matter before a booking is on the wire.
        (P::Idle | P::LocationsEntered | P::RouteComputed { .. }, E::LocationsChanged { both_present }) => {
            if both_present {
                P::LocationsEntered
            } else {
                P::Idle
            }
        }
        (P::LocationsEntered, E::RouteComputed { quote }) => P::RouteComputed { quote },
        (P::LocationsEntered | P::RouteComputed { .. }, E::RouteFailed) => P::LocationsEntered,
        (P::RouteComputed { quote }, E::Submitted { booking_id }) => P::Submitted {
            booking_id,
            quote,
        },
        (P::Submitted { booking_id, .. }, E::DriverAccepted { booking_id: accepted_id, driver })
            if booking_id == accepted_id =>
        {
            P::DriverAssigned {
                booking_id,
                driver,
            }
        }
        (P::DriverAssigned { booking_id, driver }, E::DriverReached { booking_id: reached_id })
            if booking_id == reached_id =>
        {
            P::Arrived { booking_id, driver }
        }
        (_, E::Reset) => P::Idle,
        (phase, _) => phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::LatLng;

    fn quote() -> RouteQuote {
        RouteQuote {
            distance_text: "10 km".into(),
            duration_text: "18 mins".into(),
            fare: 25.0,
        }
    }

    fn driver(name: &str) -> DriverDetails {
        DriverDetails {
            name: name.into(),
            coordinates: Some(LatLng::new(28.6, 77.4)),
        }
    }

    #[test]
    fn entering_both_locations_advances_and_clearing_one_retreats() {
        let phase = advance(
            BookingPhase::Idle,
            BookingEvent::LocationsChanged { both_present: true },
        );
        assert_eq!(phase, BookingPhase::LocationsEntered);

        let phase = advance(phase, BookingEvent::LocationsChanged { both_present: false });
        assert_eq!(phase, BookingPhase::Idle);
    }

    #[test]
    fn editing_locations_invalidates_a_computed_route() {
        let phase = advance(
            BookingPhase::LocationsEntered,
            BookingEvent::RouteComputed { quote: quote() },
        );
        assert!(phase.is_submittable());

        let phase = advance(phase, BookingEvent::LocationsChanged { both_present: true });
        assert_eq!(phase, BookingPhase::LocationsEntered);
        assert!(!phase.is_submittable());
    }

    #[test]
    fn submission_is_blocked_until_a_route_is_computed() {
        let submitted = BookingEvent::Submitted {
            booking_id: "bk-1".into(),
        };
        assert_eq!(
            advance(BookingPhase::Idle, submitted.clone()),
            BookingPhase::Idle
        );
        assert_eq!(
            advance(BookingPhase::LocationsEntered, submitted.clone()),
            BookingPhase::LocationsEntered
        );

        let computed = BookingPhase::RouteComputed { quote: quote() };
        match advance(computed, submitted) {
            BookingPhase::Submitted { booking_id, .. } => assert_eq!(booking_id, "bk-1"),
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[test]
    fn driver_accepted_applies_exactly_once_per_booking_id() {
        let submitted = BookingPhase::Submitted {
            booking_id: "bk-1".into(),
            quote: quote(),
        };

        // An accept for some other booking is ignored.
        let phase = advance(
            submitted.clone(),
            BookingEvent::DriverAccepted {
                booking_id: "bk-2".into(),
                driver: driver("Ravi"),
            },
        );
        assert_eq!(phase, submitted);

        let assigned = advance(
            submitted,
            BookingEvent::DriverAccepted {
                booking_id: "bk-1".into(),
                driver: driver("Ravi"),
            },
        );
        assert_eq!(
            assigned.assigned_driver().map(|d| d.name.as_str()),
            Some("Ravi")
        );

        // A duplicate accept for the same booking changes nothing.
        let again = advance(
            assigned.clone(),
            BookingEvent::DriverAccepted {
                booking_id: "bk-1".into(),
                driver: driver("Someone Else"),
            },
        );
        assert_eq!(again, assigned);
    }

    #[test]
    fn arrival_requires_the_matching_booking_id() {
        let assigned = BookingPhase::DriverAssigned {
            booking_id: "bk-1".into(),
            driver: driver("Ravi"),
        };

        let phase = advance(
            assigned.clone(),
            BookingEvent::DriverReached {
                booking_id: "bk-9".into(),
            },
        );
        assert_eq!(phase, assigned);

        let phase = advance(
            assigned,
            BookingEvent::DriverReached {
                booking_id: "bk-1".into(),
            },
        );
        assert!(matches!(phase, BookingPhase::Arrived { .. }));
    }

    #[test]
    fn reset_returns_to_idle_from_any_phase() {
        let arrived = BookingPhase::Arrived {
            booking_id: "bk-1".into(),
            driver: driver("Ravi"),
        };
        assert_eq!(advance(arrived, BookingEvent::Reset), BookingPhase::Idle);
    }
}
