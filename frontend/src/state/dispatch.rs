use crate::maps::LatLng;

/// A booking offered to this driver, as announced by `bookingNotification`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOffer {
    pub booking_id: String,
    pub pickup: LatLng,
    /// Filled in once the reverse geocode of the pickup point resolves.
    pub pickup_address: Option<String>,
}

/// The booking this driver accepted and is heading to.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub booking_id: String,
    pub pickup: LatLng,
}

/// Driver dispatch lifecycle. `Assigned` covers the window between the
/// accept emit and the first tick of the location stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DispatchPhase {
    #[default]
    Idle,
    OfferReceived { offer: BookingOffer },
    Assigned { assignment: Assignment },
    EnRoute { assignment: Assignment },
    Arrived { booking_id: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DispatchState {
    pub on_duty: bool,
    pub phase: DispatchPhase,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    DutyChanged(bool),
    OfferReceived { booking_id: String, pickup: LatLng },
    OfferAddressResolved { booking_id: String, address: String },
    OfferClosed { booking_id: String },
    OfferAccepted,
    OfferSkipped,
    LocationStreamStarted,
    ReachedDestination,
}

impl DispatchState {
    pub fn is_serving(&self) -> bool {
        matches!(
            self.phase,
            DispatchPhase::Assigned { .. } | DispatchPhase::EnRoute { .. }
        )
    }

    /// Offers are shown only to idle, on-duty drivers.
    pub fn accepts_offers(&self) -> bool {
        self.on_duty
            && matches!(
                self.phase,
                DispatchPhase::Idle | DispatchPhase::Arrived { .. }
            )
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match &self.phase {
            DispatchPhase::Assigned { assignment } => Some(assignment),
            DispatchPhase::EnRoute { assignment } => Some(assignment),
            _ => None,
        }
    }
}

/// Single transition function for the driver dispatch flow. Events that do
/// not apply to the current state leave it unchanged.
pub fn advance(state: DispatchState, event: DispatchEvent) -> DispatchState {
    use DispatchEvent as E;
    use DispatchPhase as P;

    let accepts_offers = state.accepts_offers();
    let DispatchState { on_duty, phase } = state;

    let (on_duty, phase) = match event {
        // Going off duty abandons whatever was in flight; the caller also
        // cancels the location task bound to the assignment.
        E::DutyChanged(false) => (false, P::Idle),
        E::DutyChanged(true) => (true, phase),
        E::OfferReceived { booking_id, pickup } if accepts_offers => (
            on_duty,
            P::OfferReceived {
                offer: BookingOffer {
                    booking_id,
                    pickup,
                    pickup_address: None,
                },
            },
        ),
        E::OfferReceived { .. } => (on_duty, phase),
        E::OfferAddressResolved { booking_id, address } => match phase {
            P::OfferReceived { offer } if offer.booking_id == booking_id => (
                on_duty,
                P::OfferReceived {
                    offer: BookingOffer {
                        pickup_address: Some(address),
                        ..offer
                    },
                },
            ),
            other => (on_duty, other),
        },
        E::OfferClosed { booking_id } => match phase {
            P::OfferReceived { offer } if offer.booking_id == booking_id => (on_duty, P::Idle),
            other => (on_duty, other),
        },
        E::OfferAccepted => match phase {
            P::OfferReceived { offer } => (
                on_duty,
                P::Assigned {
                    assignment: Assignment {
                        booking_id: offer.booking_id,
                        pickup: offer.pickup,
                    },
                },
            ),
            other => (on_duty, other),
        },
        E::OfferSkipped => match phase {
            P::OfferReceived { .. } => (on_duty, P::Idle),
            other => (on_duty, other),
        },
        E::LocationStreamStarted => match phase {
            P::Assigned { assignment } => (on_duty, P::EnRoute { assignment }),
            other => (on_duty, other),
        },
        E::ReachedDestination => match phase {
            P::Assigned { assignment } | P::EnRoute { assignment } => (
                on_duty,
                P::Arrived {
                    booking_id: assignment.booking_id,
                },
            ),
            other => (on_duty, other),
        },
    };

    DispatchState { on_duty, phase }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer_event(id: &str) -> DispatchEvent {
        DispatchEvent::OfferReceived {
            booking_id: id.into(),
            pickup: LatLng::new(28.6, 77.4),
        }
    }

    fn on_duty_idle() -> DispatchState {
        DispatchState {
            on_duty: true,
            phase: DispatchPhase::Idle,
        }
    }

    #[test]
    fn offers_are_ignored_while_off_duty() {
        let state = advance(DispatchState::default(), offer_event("bk-1"));
        assert_eq!(state.phase, DispatchPhase::Idle);
    }

    #[test]
    fn offers_are_ignored_while_serving() {
        let serving = DispatchState {
            on_duty: true,
            phase: DispatchPhase::EnRoute {
                assignment: Assignment {
                    booking_id: "bk-1".into(),
                    pickup: LatLng::new(1.0, 2.0),
                },
            },
        };
        let state = advance(serving.clone(), offer_event("bk-2"));
        assert_eq!(state, serving);
    }

    #[test]
    fn accept_then_stream_start_walks_to_en_route() {
        let state = advance(on_duty_idle(), offer_event("bk-1"));
        assert!(matches!(state.phase, DispatchPhase::OfferReceived { .. }));

        let state = advance(state, DispatchEvent::OfferAccepted);
        assert!(matches!(state.phase, DispatchPhase::Assigned { .. }));
        assert!(state.is_serving());

        let state = advance(state, DispatchEvent::LocationStreamStarted);
        match &state.phase {
            DispatchPhase::EnRoute { assignment } => {
                assert_eq!(assignment.booking_id, "bk-1");
            }
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[test]
    fn skip_returns_to_listening() {
        let state = advance(on_duty_idle(), offer_event("bk-1"));
        let state = advance(state, DispatchEvent::OfferSkipped);
        assert_eq!(state.phase, DispatchPhase::Idle);
        assert!(state.on_duty);
    }

    #[test]
    fn close_popup_clears_only_the_matching_offer() {
        let state = advance(on_duty_idle(), offer_event("bk-1"));

        let unchanged = advance(
            state.clone(),
            DispatchEvent::OfferClosed {
                booking_id: "bk-9".into(),
            },
        );
        assert_eq!(unchanged, state);

        let cleared = advance(
            state,
            DispatchEvent::OfferClosed {
                booking_id: "bk-1".into(),
            },
        );
        assert_eq!(cleared.phase, DispatchPhase::Idle);
    }

    #[test]
    fn address_resolution_patches_the_displayed_offer() {
        let state = advance(on_duty_idle(), offer_event("bk-1"));
        let state = advance(
            state,
            DispatchEvent::OfferAddressResolved {
                booking_id: "bk-1".into(),
                address: "12 Hospital Road".into(),
            },
        );
        match &state.phase {
            DispatchPhase::OfferReceived { offer } => {
                assert_eq!(offer.pickup_address.as_deref(), Some("12 Hospital Road"));
            }
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[test]
    fn duty_off_clears_an_active_assignment() {
        let state = advance(on_duty_idle(), offer_event("bk-1"));
        let state = advance(state, DispatchEvent::OfferAccepted);
        let state = advance(state, DispatchEvent::LocationStreamStarted);
        assert!(state.is_serving());

        let state = advance(state, DispatchEvent::DutyChanged(false));
        assert!(!state.on_duty);
        assert_eq!(state.phase, DispatchPhase::Idle);
        assert!(!state.is_serving());
    }

    #[test]
    fn reached_lands_in_the_arrived_phase_and_reopens_offers() {
        let state = advance(on_duty_idle(), offer_event("bk-1"));
        let state = advance(state, DispatchEvent::OfferAccepted);
        let state = advance(state, DispatchEvent::LocationStreamStarted);
        let state = advance(state, DispatchEvent::ReachedDestination);
        assert_eq!(
            state.phase,
            DispatchPhase::Arrived {
                booking_id: "bk-1".into()
            }
        );
        assert!(state.accepts_offers());

        let state = advance(state, offer_event("bk-2"));
        assert!(matches!(state.phase, DispatchPhase::OfferReceived { .. }));
    }
}
