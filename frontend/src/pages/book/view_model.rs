use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::*;
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};

use crate::api::types::ApiError;
use crate::maps::{self, js, LatLng, MapsError};
use crate::pages::book::utils::{self, BookingKind};
use crate::realtime::{use_realtime, ClientEvent, ServerEvent};
use crate::state::booking::{self, BookingEvent, BookingPhase, RouteQuote};

pub const MAP_ID: &str = "map";
pub const DIRECTIONS_PANEL_ID: &str = "directions-panel";
pub const PICKUP_INPUT_ID: &str = "pickup";
pub const DROP_INPUT_ID: &str = "drop";

const MAP_ZOOM: u32 = 12;
const MAP_CENTER: LatLng = LatLng {
    lat: 28.6692,
    lng: 77.4538,
};

/// Live Maps objects once the script has loaded and the map is mounted.
struct MapHandles {
    map: js::Map,
    service: js::DirectionsService,
    renderer: js::DirectionsRenderer,
    driver_marker: Option<js::Marker>,
}

#[derive(Clone)]
pub struct SubmitPayload {
    pub booking_id: String,
    pub pickup: String,
}

#[derive(Clone)]
pub struct BookViewModel {
    pub booking_type: RwSignal<BookingKind>,
    /// Pickup and drop-off as resolved addresses; the inputs themselves stay
    /// uncontrolled because the autocomplete widget writes into them.
    pub pickup: RwSignal<String>,
    pub dropoff: RwSignal<String>,
    pub phase: RwSignal<BookingPhase>,
    pub error: RwSignal<Option<ApiError>>,
    pub success: RwSignal<Option<String>>,
    pub locating: RwSignal<bool>,
    pub maps_ready: RwSignal<bool>,
    pub maps_error: RwSignal<Option<MapsError>>,
    pub submit_action: Action<SubmitPayload, Result<String, ApiError>>,
    maps_retry: RwSignal<u32>,
    handles: Rc<RefCell<Option<MapHandles>>>,
}

impl BookViewModel {
    pub fn new() -> Self {
        let realtime = use_realtime();

        let booking_type = create_rw_signal(BookingKind::default());
        let pickup = create_rw_signal(String::new());
        let dropoff = create_rw_signal(String::new());
        let phase = create_rw_signal(BookingPhase::default());
        let error = create_rw_signal(None::<ApiError>);
        let success = create_rw_signal(None::<String>);
        let locating = create_rw_signal(false);
        let maps_ready = create_rw_signal(false);
        let maps_error = create_rw_signal(None::<MapsError>);
        let maps_retry = create_rw_signal(0u32);
        let handles: Rc<RefCell<Option<MapHandles>>> = Rc::new(RefCell::new(None));
        let route_epoch = Rc::new(Cell::new(0u64));

        {
            let handles = Rc::clone(&handles);
            let init_in_flight = Rc::new(Cell::new(false));
            create_effect(move |_| {
                maps_retry.get();
                if maps_ready.get_untracked() || init_in_flight.get() {
                    return;
                }
                init_in_flight.set(true);
                maps_error.set(None);
                let handles = Rc::clone(&handles);
                let init_in_flight = Rc::clone(&init_in_flight);
                spawn_local(async move {
                    let outcome = init_map_stack(&handles, pickup, dropoff).await;
                    init_in_flight.set(false);
                    match outcome {
                        Ok(()) => maps_ready.set(true),
                        Err(err) => {
                            log::error!("maps bootstrap failed: {err}");
                            maps_error.set(Some(err));
                        }
                    }
                });
            });
        }

        // Either location settling re-debounces the route lookup; clearing a
        // field bumps the epoch so an in-flight lookup lands on the floor.
        {
            let handles = Rc::clone(&handles);
            let route_epoch = Rc::clone(&route_epoch);
            create_effect(move |_| {
                let origin = pickup.get();
                let destination = dropoff.get();
                let both_present =
                    !origin.trim().is_empty() && !destination.trim().is_empty();
                apply(phase, BookingEvent::LocationsChanged { both_present });

                let epoch = route_epoch.get().wrapping_add(1);
                route_epoch.set(epoch);
                if !both_present {
                    return;
                }
                let handles = Rc::clone(&handles);
                let route_epoch = Rc::clone(&route_epoch);
                spawn_local(async move {
                    TimeoutFuture::new(utils::ROUTE_DEBOUNCE_MS).await;
                    if route_epoch.get() != epoch {
                        return;
                    }
                    let Some((service, renderer)) = handles
                        .borrow()
                        .as_ref()
                        .map(|live| (live.service.clone(), live.renderer.clone()))
                    else {
                        return;
                    };
                    match maps::compute_route(&service, &renderer, &origin, &destination).await
                    {
                        Ok(summary) => {
                            let fare = utils::fare_for(
                                booking_type.get_untracked(),
                                utils::parse_distance_km(&summary.distance_text),
                            );
                            error.set(None);
                            apply(
                                phase,
                                BookingEvent::RouteComputed {
                                    quote: RouteQuote {
                                        distance_text: summary.distance_text,
                                        duration_text: summary.duration_text,
                                        fare,
                                    },
                                },
                            );
                        }
                        Err(err) => {
                            log::warn!("route lookup failed: {err}");
                            error.set(Some(ApiError::unknown(err.to_string())));
                            apply(phase, BookingEvent::RouteFailed);
                        }
                    }
                });
            });
        }

        // Switching the booking type re-prices the computed route without a
        // fresh directions request.
        create_effect(move |_| {
            let kind = booking_type.get();
            phase.update(|current| {
                if let BookingPhase::RouteComputed { quote } = current {
                    quote.fare =
                        utils::fare_for(kind, utils::parse_distance_km(&quote.distance_text));
                }
            });
        });

        let emit_client = realtime.clone();
        let submit_action = create_action(move |payload: &SubmitPayload| {
            let realtime = emit_client.clone();
            let payload = payload.clone();
            async move {
                let coordinates = maps::geocode_address(&payload.pickup)
                    .await
                    .map_err(|_| ApiError::unknown("Unable to locate the pickup address"))?;
                realtime
                    .emit(&ClientEvent::NewBooking {
                        booking_id: payload.booking_id.clone(),
                        pickup_coordinates: coordinates,
                    })
                    .map_err(|err| ApiError::unknown(err.to_string()))?;
                Ok(payload.booking_id)
            }
        });

        create_effect(move |_| {
            if let Some(result) = submit_action.value().get() {
                match result {
                    Ok(booking_id) => {
                        error.set(None);
                        apply(phase, BookingEvent::Submitted { booking_id });
                    }
                    Err(err) => error.set(Some(err)),
                }
            }
        });

        let subscription = realtime.subscribe(move |event| match event {
            ServerEvent::DriverAccepted {
                booking_id,
                driver_details,
                ..
            } => {
                apply(
                    phase,
                    BookingEvent::DriverAccepted {
                        booking_id: booking_id.clone(),
                        driver: driver_details.clone(),
                    },
                );
            }
            ServerEvent::DriverReached { booking_id, .. } => {
                apply(
                    phase,
                    BookingEvent::DriverReached {
                        booking_id: booking_id.clone(),
                    },
                );
            }
            _ => {}
        });
        store_value(subscription);

        // The memo dedupes repeated accepts for the same booking, so the
        // marker is placed and panned to exactly once per assignment.
        let assigned_driver = create_memo(move |_| phase.get().assigned_driver().cloned());
        {
            let handles = Rc::clone(&handles);
            create_effect(move |_| {
                let Some(driver) = assigned_driver.get() else {
                    return;
                };
                let Some(position) = driver.coordinates else {
                    return;
                };
                place_driver_marker(&handles, position, &driver.name);
            });
        }

        Self {
            booking_type,
            pickup,
            dropoff,
            phase,
            error,
            success,
            locating,
            maps_ready,
            maps_error,
            submit_action,
            maps_retry,
            handles,
        }
    }

    pub fn handle_submit(&self) -> impl Fn(SubmitEvent) {
        let phase = self.phase;
        let pickup = self.pickup;
        let dropoff = self.dropoff;
        let error = self.error;
        let success = self.success;
        let submit_action = self.submit_action;
        move |ev: SubmitEvent| {
            ev.prevent_default();
            if submit_action.pending().get_untracked() {
                return;
            }
            let origin = pickup.get_untracked();
            let route_ready = phase.get_untracked().is_submittable();
            if let Err(message) =
                utils::validate_submission(&origin, &dropoff.get_untracked(), route_ready)
            {
                error.set(Some(ApiError::validation(message)));
                return;
            }
            error.set(None);
            success.set(None);
            submit_action.dispatch(SubmitPayload {
                booking_id: Uuid::new_v4().to_string(),
                pickup: origin,
            });
        }
    }

    pub fn handle_use_current_location(&self) -> impl Fn(MouseEvent) {
        let pickup = self.pickup;
        let error = self.error;
        let success = self.success;
        let locating = self.locating;
        move |_| {
            if locating.get_untracked() {
                return;
            }
            locating.set(true);
            spawn_local(async move {
                let outcome = resolve_current_address().await;
                locating.set(false);
                match outcome {
                    Ok(address) => {
                        if let Some(input) =
                            element_by_id::<web_sys::HtmlInputElement>(PICKUP_INPUT_ID)
                        {
                            input.set_value(&address);
                        }
                        pickup.set(address);
                        error.set(None);
                        success.set(Some("Current location set as pickup".to_string()));
                    }
                    Err(message) => {
                        success.set(None);
                        error.set(Some(ApiError::unknown(message)));
                    }
                }
            });
        }
    }

    pub fn handle_retry_maps(&self) -> impl Fn(MouseEvent) {
        let maps_retry = self.maps_retry;
        move |_| {
            maps_retry.update(|attempt| *attempt += 1);
        }
    }

    /// Clears the finished booking so the form starts over.
    pub fn handle_reset(&self) -> impl Fn(MouseEvent) {
        let phase = self.phase;
        let pickup = self.pickup;
        let dropoff = self.dropoff;
        let error = self.error;
        let success = self.success;
        let handles = Rc::clone(&self.handles);
        move |_| {
            apply(phase, BookingEvent::Reset);
            pickup.set(String::new());
            dropoff.set(String::new());
            error.set(None);
            success.set(None);
            for id in [PICKUP_INPUT_ID, DROP_INPUT_ID] {
                if let Some(input) = element_by_id::<web_sys::HtmlInputElement>(id) {
                    input.set_value("");
                }
            }
            if let Some(live) = handles.borrow_mut().as_mut() {
                if let Some(marker) = live.driver_marker.take() {
                    marker.set_map(&JsValue::NULL);
                }
            }
        }
    }
}

pub fn use_book_view_model() -> BookViewModel {
    match use_context::<BookViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = BookViewModel::new();
            provide_context(vm.clone());
            vm
        }
    }
}

fn apply(phase: RwSignal<BookingPhase>, event: BookingEvent) {
    phase.update(|current| *current = booking::advance(std::mem::take(current), event));
}

async fn init_map_stack(
    handles: &Rc<RefCell<Option<MapHandles>>>,
    pickup: RwSignal<String>,
    dropoff: RwSignal<String>,
) -> Result<(), MapsError> {
    maps::load_maps_script().await?;

    let container: web_sys::HtmlElement =
        element_by_id(MAP_ID).ok_or(MapsError::ContainerNotFound)?;
    let map = maps::new_map(&container, MAP_CENTER, MAP_ZOOM);
    let directions_panel: Option<web_sys::HtmlElement> = element_by_id(DIRECTIONS_PANEL_ID);
    let service = js::DirectionsService::new();
    let renderer = maps::new_directions_renderer(&map, directions_panel.as_ref());

    if let Some(input) = element_by_id::<web_sys::HtmlInputElement>(PICKUP_INPUT_ID) {
        maps::attach_autocomplete(&input, &["formatted_address", "geometry"], move |address| {
            pickup.set(address)
        });
    }
    if let Some(input) = element_by_id::<web_sys::HtmlInputElement>(DROP_INPUT_ID) {
        maps::attach_autocomplete(&input, &["formatted_address"], move |address| {
            dropoff.set(address)
        });
    }

    *handles.borrow_mut() = Some(MapHandles {
        map,
        service,
        renderer,
        driver_marker: None,
    });
    Ok(())
}

async fn resolve_current_address() -> Result<String, String> {
    let position = maps::current_position()
        .await
        .map_err(|err| err.to_string())?;
    maps::reverse_geocode(position)
        .await
        .map_err(|_| "Unable to retrieve address for current location".to_string())
}

fn place_driver_marker(handles: &Rc<RefCell<Option<MapHandles>>>, position: LatLng, title: &str) {
    let mut guard = handles.borrow_mut();
    let Some(live) = guard.as_mut() else {
        return;
    };
    if let Some(previous) = live.driver_marker.take() {
        previous.set_map(&JsValue::NULL);
    }
    let marker = maps::new_marker(&live.map, position, title, Some(maps::DRIVER_MARKER_ICON));
    live.map.pan_to(&position.to_js());
    live.driver_marker = Some(marker);
}

fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into()
        .ok()
}
