use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::ev::Event;
use leptos::*;

use crate::api::types::{ApiError, DutyStatusResponse};
use crate::api::ApiClient;
use crate::maps;
use crate::pages::driver_duty::utils::{self, LOCATION_PUSH_INTERVAL_MS, OFFER_CLOSED_MESSAGE};
use crate::realtime::{use_realtime, ClientEvent, DriverDetails, RealtimeClient, ServerEvent};
use crate::state::auth::{use_auth, AuthState};
use crate::state::dispatch::{self, DispatchEvent, DispatchPhase, DispatchState};
use crate::utils::{jwt, storage};

/// Who this duty board acts as on the socket channel.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverIdentity {
    pub id: String,
    pub name: String,
}

#[derive(Clone)]
pub struct TogglePayload {
    id: String,
    going_on_duty: bool,
}

/// Cancellable geolocation push loop bound to one assignment: created on
/// accept, dropped on reach, duty-off and unmount. A position fix already
/// in flight when the guard drops resolves once but is never emitted.
pub struct LocationStream {
    cancelled: Rc<Cell<bool>>,
}

impl LocationStream {
    fn with_flag(cancelled: Rc<Cell<bool>>) -> Self {
        Self { cancelled }
    }

    fn start(
        realtime: RealtimeClient,
        driver_id: String,
        state: RwSignal<DispatchState>,
    ) -> Self {
        let cancelled = Rc::new(Cell::new(false));
        let flag = Rc::clone(&cancelled);
        spawn_local(async move {
            loop {
                TimeoutFuture::new(LOCATION_PUSH_INTERVAL_MS).await;
                if flag.get() {
                    return;
                }
                let coordinates = match maps::current_position().await {
                    Ok(position) => position,
                    Err(err) => {
                        log::warn!("location fix failed: {err}");
                        continue;
                    }
                };
                if flag.get() {
                    return;
                }
                if let Err(err) = realtime.emit(&ClientEvent::DriverLocation {
                    driver_id: driver_id.clone(),
                    coordinates,
                }) {
                    log::warn!("driver location emit failed: {err}");
                }
                apply(state, DispatchEvent::LocationStreamStarted);
            }
        });
        Self { cancelled }
    }
}

impl Drop for LocationStream {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

#[derive(Clone)]
pub struct DutyViewModel {
    pub state: RwSignal<DispatchState>,
    pub error: RwSignal<Option<ApiError>>,
    pub notice: RwSignal<Option<String>>,
    pub identity: Memo<Option<DriverIdentity>>,
    pub toggle_action: Action<TogglePayload, Result<(TogglePayload, DutyStatusResponse), ApiError>>,
    stream: Rc<RefCell<Option<LocationStream>>>,
}

impl DutyViewModel {
    pub fn new() -> Self {
        let realtime = use_realtime();
        let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let (auth, _) = use_auth();

        let state = create_rw_signal(DispatchState::default());
        let error = create_rw_signal(None::<ApiError>);
        let notice = create_rw_signal(None::<String>);
        let stream: Rc<RefCell<Option<LocationStream>>> = Rc::new(RefCell::new(None));
        let identity = create_memo(move |_| session_identity(&auth.get()));

        // Seed duty state from the driver listing once the session settles,
        // and register on the channel when the record says on duty.
        {
            let api_client = api_client.clone();
            let realtime = realtime.clone();
            let seeded = Rc::new(Cell::new(false));
            create_effect(move |_| {
                let Some(driver) = identity.get() else {
                    return;
                };
                if seeded.get() {
                    return;
                }
                seeded.set(true);
                let api_client = api_client.clone();
                let realtime = realtime.clone();
                spawn_local(async move {
                    match api_client.find_driver(&driver.id).await {
                        Ok(Some(record)) => {
                            apply(state, DispatchEvent::DutyChanged(record.on_duty));
                            if record.on_duty {
                                register(&realtime, &driver.id);
                            }
                        }
                        Ok(None) => {
                            log::warn!("no driver record for session subject {}", driver.id);
                        }
                        Err(err) => error.set(Some(err)),
                    }
                });
            });
        }

        let toggle_client = api_client.clone();
        let toggle_action = create_action(move |payload: &TogglePayload| {
            let api_client = toggle_client.clone();
            let payload = payload.clone();
            async move {
                let response = api_client.toggle_duty(&payload.id).await?;
                Ok((payload, response))
            }
        });

        {
            let realtime = realtime.clone();
            let stream = Rc::clone(&stream);
            create_effect(move |_| {
                let Some(result) = toggle_action.value().get() else {
                    return;
                };
                match result {
                    Ok((payload, response)) => {
                        let on_duty = response.on_duty.unwrap_or(payload.going_on_duty);
                        if !on_duty {
                            // Going off duty abandons the assignment and its
                            // location loop.
                            stream.borrow_mut().take();
                        }
                        apply(state, DispatchEvent::DutyChanged(on_duty));
                        if on_duty {
                            register(&realtime, &payload.id);
                        }
                        error.set(None);
                        notice.set(Some(utils::duty_toast(on_duty)));
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        }

        let subscription = realtime.subscribe(move |event| match event {
            ServerEvent::BookingNotification {
                booking_id,
                pickup_coordinates,
            } => {
                if !state.get_untracked().accepts_offers() {
                    log::debug!("ignoring offer {booking_id}: off duty or already serving");
                    return;
                }
                apply(
                    state,
                    DispatchEvent::OfferReceived {
                        booking_id: booking_id.clone(),
                        pickup: *pickup_coordinates,
                    },
                );
                let booking_id = booking_id.clone();
                let pickup = *pickup_coordinates;
                spawn_local(async move {
                    match maps::reverse_geocode(pickup).await {
                        Ok(address) => apply(
                            state,
                            DispatchEvent::OfferAddressResolved {
                                booking_id,
                                address,
                            },
                        ),
                        Err(err) => log::debug!("pickup reverse geocode failed: {err}"),
                    }
                });
            }
            ServerEvent::CloseBookingPopup { booking_id } => {
                let was_displayed = matches!(
                    &state.get_untracked().phase,
                    DispatchPhase::OfferReceived { offer } if offer.booking_id == *booking_id
                );
                apply(
                    state,
                    DispatchEvent::OfferClosed {
                        booking_id: booking_id.clone(),
                    },
                );
                if was_displayed {
                    notice.set(Some(OFFER_CLOSED_MESSAGE.to_string()));
                }
            }
            _ => {}
        });
        store_value(subscription);

        {
            let stream = Rc::clone(&stream);
            on_cleanup(move || {
                stream.borrow_mut().take();
            });
        }

        Self {
            state,
            error,
            notice,
            identity,
            toggle_action,
            stream,
        }
    }

    pub fn handle_toggle_duty(&self) -> impl Fn(Event) {
        let state = self.state;
        let error = self.error;
        let notice = self.notice;
        let identity = self.identity;
        let toggle_action = self.toggle_action;
        move |_| {
            if toggle_action.pending().get_untracked() {
                return;
            }
            let Some(driver) = identity.get_untracked() else {
                error.set(Some(ApiError::unknown("Session has no driver id")));
                return;
            };
            error.set(None);
            notice.set(None);
            toggle_action.dispatch(TogglePayload {
                id: driver.id,
                going_on_duty: !state.get_untracked().on_duty,
            });
        }
    }

    /// Accepts the displayed offer: one position fix for the accept payload,
    /// then the 2-second location loop until reached.
    pub fn handle_accept(&self) -> impl Fn(()) {
        let state = self.state;
        let error = self.error;
        let notice = self.notice;
        let identity = self.identity;
        let realtime = use_realtime();
        let stream = Rc::clone(&self.stream);
        move |_| {
            let Some(driver) = identity.get_untracked() else {
                return;
            };
            let DispatchPhase::OfferReceived { offer } = state.get_untracked().phase else {
                return;
            };
            notice.set(None);
            let realtime = realtime.clone();
            let stream = Rc::clone(&stream);
            spawn_local(async move {
                let coordinates = maps::current_position().await.ok();
                let outcome = realtime.emit(&ClientEvent::AcceptBooking {
                    booking_id: offer.booking_id.clone(),
                    driver_id: driver.id.clone(),
                    driver_details: DriverDetails {
                        name: driver.name.clone(),
                        coordinates,
                    },
                });
                if let Err(err) = outcome {
                    error.set(Some(ApiError::unknown(err.to_string())));
                    return;
                }
                apply(state, DispatchEvent::OfferAccepted);
                *stream.borrow_mut() =
                    Some(LocationStream::start(realtime, driver.id, state));
            });
        }
    }

    pub fn handle_skip(&self) -> impl Fn(()) {
        let state = self.state;
        let identity = self.identity;
        let realtime = use_realtime();
        move |_| {
            let Some(driver) = identity.get_untracked() else {
                return;
            };
            let DispatchPhase::OfferReceived { offer } = state.get_untracked().phase else {
                return;
            };
            if let Err(err) = realtime.emit(&ClientEvent::SkipBooking {
                booking_id: offer.booking_id,
                driver_id: driver.id,
            }) {
                log::warn!("skip emit failed: {err}");
            }
            apply(state, DispatchEvent::OfferSkipped);
        }
    }

    pub fn handle_reached(&self) -> impl Fn(()) {
        let state = self.state;
        let notice = self.notice;
        let identity = self.identity;
        let realtime = use_realtime();
        let stream = Rc::clone(&self.stream);
        move |_| {
            let Some(driver) = identity.get_untracked() else {
                return;
            };
            let Some(assignment) = state.get_untracked().assignment().cloned() else {
                return;
            };
            stream.borrow_mut().take();
            if let Err(err) = realtime.emit(&ClientEvent::DriverReached {
                booking_id: assignment.booking_id,
                driver_id: driver.id,
            }) {
                log::warn!("reached emit failed: {err}");
            }
            apply(state, DispatchEvent::ReachedDestination);
            notice.set(Some("Marked as reached. You can take new bookings.".to_string()));
        }
    }
}

pub fn use_duty_view_model() -> DutyViewModel {
    match use_context::<DutyViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = DutyViewModel::new();
            provide_context(vm.clone());
            vm
        }
    }
}

fn apply(state: RwSignal<DispatchState>, event: DispatchEvent) {
    state.update(|current| *current = dispatch::advance(std::mem::take(current), event));
}

fn register(realtime: &RealtimeClient, driver_id: &str) {
    if let Err(err) = realtime.emit(&ClientEvent::RegisterDriver(driver_id.to_string())) {
        log::warn!("driver registration emit failed: {err}");
    }
}

/// Driver id from the verified session user, falling back to the token
/// claims the way the duty board originally did.
fn session_identity(auth: &AuthState) -> Option<DriverIdentity> {
    let id = auth
        .user
        .as_ref()
        .and_then(|user| user.id.clone())
        .or_else(|| {
            storage::read_access_token()
                .and_then(|token| jwt::decode_claims(&token))
                .and_then(|claims| claims.id)
        })?;
    Some(DriverIdentity {
        id,
        name: auth.display_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::UserResponse;

    #[test]
    fn dropping_the_stream_guard_cancels_the_loop() {
        let flag = Rc::new(Cell::new(false));
        drop(LocationStream::with_flag(Rc::clone(&flag)));
        assert!(flag.get());
    }

    #[test]
    fn identity_comes_from_the_verified_user() {
        let auth = AuthState {
            user: Some(UserResponse {
                id: Some("drv-7".into()),
                name: Some("Ravi".into()),
                email: None,
                role: Some("driver".into()),
            }),
            role_hint: None,
            is_authenticated: true,
            loading: false,
        };
        let identity = session_identity(&auth).unwrap();
        assert_eq!(identity.id, "drv-7");
        assert_eq!(identity.name, "Ravi");
    }

    #[test]
    fn identity_is_absent_without_a_subject() {
        // No verified user and no stored token (host has no session storage).
        assert_eq!(session_identity(&AuthState::default()), None);
    }
}
