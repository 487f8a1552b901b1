use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::ev::MouseEvent;
use leptos::*;
use wasm_bindgen::{JsCast, JsValue};

use crate::maps::{self, js, LatLng, MapsError};
use crate::pages::track_driver::utils::{self, TrackQuery};
use crate::realtime::{use_realtime, ClientEvent, ServerEvent};

pub const MAP_ID: &str = "track-map";

const MAP_ZOOM: u32 = 14;
const FALLBACK_CENTER: LatLng = LatLng {
    lat: 28.6692,
    lng: 77.4538,
};

struct TrackHandles {
    map: js::Map,
    marker: Option<js::Marker>,
}

#[derive(Clone)]
pub struct TrackViewModel {
    pub booking_id: Option<String>,
    pub driver_name: String,
    pub position: RwSignal<Option<LatLng>>,
    pub reached: RwSignal<bool>,
    pub notice: RwSignal<Option<String>>,
    pub maps_ready: RwSignal<bool>,
    pub maps_error: RwSignal<Option<MapsError>>,
    /// Transport-level connect failures from the shared channel.
    pub connection_error: RwSignal<Option<String>>,
    maps_retry: RwSignal<u32>,
    queue: Rc<RefCell<Vec<LatLng>>>,
    handles: Rc<RefCell<Option<TrackHandles>>>,
}

impl TrackViewModel {
    pub fn new(query: TrackQuery) -> Self {
        let realtime = use_realtime();

        let booking_id = query.booking_id.clone();
        let driver_name = utils::display_name(&query);
        let position = create_rw_signal(query.initial_position);
        let reached = create_rw_signal(false);
        let notice = create_rw_signal(None::<String>);
        let maps_ready = create_rw_signal(false);
        let maps_error = create_rw_signal(None::<MapsError>);
        let maps_retry = create_rw_signal(0u32);
        let connection_error = realtime.last_error;
        let queue: Rc<RefCell<Vec<LatLng>>> = Rc::new(RefCell::new(Vec::new()));
        let handles: Rc<RefCell<Option<TrackHandles>>> = Rc::new(RefCell::new(None));

        // Join the booking room up front (buffered until the socket opens)
        // and again on every reconnect, since the server forgets rooms on
        // a dropped connection.
        if let Some(id) = &booking_id {
            join_booking(&realtime, id);
        }
        {
            let realtime = realtime.clone();
            let booking_id = booking_id.clone();
            let connected = realtime.connected;
            create_effect(move |previous: Option<bool>| {
                let now = connected.get();
                if now && previous == Some(false) {
                    if let Some(id) = &booking_id {
                        log::info!("realtime reconnected, re-joining booking {id}");
                        join_booking(&realtime, id);
                    }
                }
                now
            });
        }

        {
            let queue = Rc::clone(&queue);
            let handles = Rc::clone(&handles);
            let expected = booking_id.clone();
            let title = driver_name.clone();
            let subscription = realtime.subscribe(move |event| match event {
                ServerEvent::DriverLocationUpdate { coordinates } => {
                    if reached.get_untracked() {
                        return;
                    }
                    if maps_ready.get_untracked() {
                        position.set(Some(*coordinates));
                        show_position(&handles, *coordinates, &title);
                    } else {
                        // Map still bootstrapping; replayed once it is up.
                        queue.borrow_mut().push(*coordinates);
                    }
                }
                ServerEvent::DriverReached { booking_id, .. } => {
                    if expected.as_deref() != Some(booking_id.as_str()) {
                        return;
                    }
                    reached.set(true);
                    notice.set(Some("Your driver has arrived!".to_string()));
                    if let Some(live) = handles.borrow_mut().as_mut() {
                        if let Some(marker) = live.marker.take() {
                            marker.set_map(&JsValue::NULL);
                        }
                    }
                }
                _ => {}
            });
            store_value(subscription);
        }

        {
            let queue = Rc::clone(&queue);
            let handles = Rc::clone(&handles);
            let title = driver_name.clone();
            let init_in_flight = Rc::new(Cell::new(false));
            create_effect(move |_| {
                maps_retry.get();
                if maps_ready.get_untracked() || init_in_flight.get() {
                    return;
                }
                init_in_flight.set(true);
                maps_error.set(None);
                let queue = Rc::clone(&queue);
                let handles = Rc::clone(&handles);
                let title = title.clone();
                let init_in_flight = Rc::clone(&init_in_flight);
                spawn_local(async move {
                    let outcome = init_track_map(&handles, position, &title).await;
                    init_in_flight.set(false);
                    match outcome {
                        Ok(()) => {
                            maps_ready.set(true);
                            let buffered: Vec<LatLng> = queue.borrow_mut().drain(..).collect();
                            if !buffered.is_empty() {
                                log::debug!("replaying {} queued location updates", buffered.len());
                            }
                            for coordinates in buffered {
                                position.set(Some(coordinates));
                                show_position(&handles, coordinates, &title);
                            }
                        }
                        Err(err) => {
                            log::error!("track map bootstrap failed: {err}");
                            maps_error.set(Some(err));
                        }
                    }
                });
            });
        }

        Self {
            booking_id,
            driver_name,
            position,
            reached,
            notice,
            maps_ready,
            maps_error,
            connection_error,
            maps_retry,
            queue,
            handles,
        }
    }

    pub fn handle_retry_maps(&self) -> impl Fn(MouseEvent) {
        let maps_retry = self.maps_retry;
        move |_| {
            maps_retry.update(|attempt| *attempt += 1);
        }
    }

    #[cfg(test)]
    pub(crate) fn queued_updates(&self) -> usize {
        self.queue.borrow().len()
    }
}

pub fn use_track_view_model() -> TrackViewModel {
    match use_context::<TrackViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = TrackViewModel::new(query_from_router());
            provide_context(vm.clone());
            vm
        }
    }
}

fn query_from_router() -> TrackQuery {
    if use_context::<leptos_router::RouterContext>().is_none() {
        return TrackQuery::default();
    }
    let params = leptos_router::use_query_map().get_untracked();
    utils::parse_track_query(|key| params.get(key).cloned())
}

fn join_booking(realtime: &crate::realtime::RealtimeClient, booking_id: &str) {
    if let Err(err) = realtime.emit(&ClientEvent::JoinBooking {
        booking_id: booking_id.to_string(),
    }) {
        log::warn!("joinBooking emit failed: {err}");
    }
}

async fn init_track_map(
    handles: &Rc<RefCell<Option<TrackHandles>>>,
    position: RwSignal<Option<LatLng>>,
    title: &str,
) -> Result<(), MapsError> {
    maps::load_maps_script().await?;

    let container: web_sys::HtmlElement =
        element_by_id(MAP_ID).ok_or(MapsError::ContainerNotFound)?;
    let center = position.get_untracked().unwrap_or(FALLBACK_CENTER);
    let map = maps::new_map(&container, center, MAP_ZOOM);
    let marker = position
        .get_untracked()
        .map(|initial| maps::new_marker(&map, initial, title, Some(maps::DRIVER_MARKER_ICON)));

    *handles.borrow_mut() = Some(TrackHandles { map, marker });
    Ok(())
}

fn show_position(handles: &Rc<RefCell<Option<TrackHandles>>>, position: LatLng, title: &str) {
    let mut guard = handles.borrow_mut();
    let Some(live) = guard.as_mut() else {
        return;
    };
    match &live.marker {
        Some(marker) => marker.set_position(&position.to_js()),
        None => {
            live.marker = Some(maps::new_marker(
                &live.map,
                position,
                title,
                Some(maps::DRIVER_MARKER_ICON),
            ));
        }
    }
    live.map.pan_to(&position.to_js());
}

fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into()
        .ok()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    fn track_query() -> TrackQuery {
        TrackQuery {
            booking_id: Some("bk-1".into()),
            driver_name: Some("John Smith".into()),
            initial_position: Some(LatLng::new(28.6692, 77.4538)),
        }
    }

    #[test]
    fn construction_seeds_from_the_query_handoff() {
        with_runtime(|| {
            let vm = TrackViewModel::new(track_query());
            assert_eq!(vm.booking_id.as_deref(), Some("bk-1"));
            assert_eq!(vm.driver_name, "John Smith");
            assert_eq!(
                vm.position.get_untracked(),
                Some(LatLng::new(28.6692, 77.4538))
            );
            assert!(!vm.reached.get_untracked());
            assert_eq!(vm.queued_updates(), 0);
        });
    }

    #[test]
    fn construction_without_a_booking_stays_inert() {
        with_runtime(|| {
            let vm = TrackViewModel::new(TrackQuery::default());
            assert_eq!(vm.booking_id, None);
            assert_eq!(vm.driver_name, "Driver");
            assert_eq!(vm.position.get_untracked(), None);
        });
    }
}
