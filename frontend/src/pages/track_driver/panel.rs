use leptos::*;

use crate::components::layout::{ErrorMessage, SuccessMessage};
use crate::pages::track_driver::view_model::{use_track_view_model, MAP_ID};

#[component]
pub fn TrackDriverPage() -> impl IntoView {
    let vm = use_track_view_model();
    let driver_name = vm.driver_name.clone();
    let has_booking = vm.booking_id.is_some();
    let position = vm.position;
    let reached = vm.reached;
    let notice = vm.notice;
    let maps_error = vm.maps_error;
    let connection_error = vm.connection_error;
    let on_retry_maps = Callback::new(vm.handle_retry_maps());

    view! {
        <section class="pt-24 pb-16 flex flex-col lg:flex-row">
            <div class="lg:w-1/3 bg-white p-8 shadow-lg lg:sticky lg:top-24 mx-4 lg:mx-0 rounded-lg">
                <h2 class="text-3xl font-bold text-gray-800 mb-6">"Track Your Driver"</h2>
                {move || {
                    connection_error
                        .get()
                        .map(|message| view! { <ErrorMessage message=message /> })
                }}
                {move || {
                    notice.get().map(|message| view! { <SuccessMessage message=message /> })
                }}
                {if has_booking {
                    ().into_view()
                } else {
                    view! {
                        <div class="p-4 bg-yellow-100 text-yellow-800 rounded-lg mb-4">
                            <p>"No active booking to track."</p>
                            <a href="/book" class="underline font-semibold">
                                "Book an ambulance"
                            </a>
                        </div>
                    }
                    .into_view()
                }}
                <div class="p-4 bg-gray-100 rounded-lg">
                    <p class="text-gray-700">
                        <strong>"Driver: "</strong>
                        {driver_name.clone()}
                    </p>
                    <p class="text-gray-700">
                        <strong>"Status: "</strong>
                        {move || {
                            if reached.get() {
                                "Arrived at pickup"
                            } else {
                                "On the way"
                            }
                        }}
                    </p>
                    {move || {
                        position
                            .get()
                            .map(|coordinates| {
                                view! {
                                    <p class="text-gray-700">
                                        <strong>"Last Known Position: "</strong>
                                        {coordinates.display()}
                                    </p>
                                }
                            })
                    }}
                </div>
                {move || {
                    reached
                        .get()
                        .then(|| {
                            view! {
                                <div class="mt-6 p-4 bg-green-100 rounded-lg">
                                    <h3 class="text-lg font-semibold text-green-800">
                                        "Your driver has arrived!"
                                    </h3>
                                    <p class="text-gray-700">
                                        {format!("{} is waiting at the pickup location.", driver_name)}
                                    </p>
                                </div>
                            }
                        })
                }}
            </div>
            <div class="lg:w-2/3 flex flex-col">
                {move || {
                    maps_error
                        .get()
                        .map(|err| {
                            view! {
                                <div class="p-4">
                                    <ErrorMessage message=err.to_string() />
                                    <button
                                        type="button"
                                        class="mt-2 bg-blue-600 text-white px-4 py-2 rounded-lg hover:bg-blue-700 transition duration-300"
                                        on:click=move |ev| on_retry_maps.call(ev)
                                    >
                                        "Retry"
                                    </button>
                                </div>
                            }
                        })
                }}
                <div id=MAP_ID class="h-[60vh] lg:h-[80vh] w-full"></div>
            </div>
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::maps::LatLng;
    use crate::pages::track_driver::utils::TrackQuery;
    use crate::pages::track_driver::view_model::TrackViewModel;
    use crate::test_support::ssr::render_to_string;

    fn provide_tracking(query: TrackQuery) {
        provide_context(TrackViewModel::new(query));
    }

    #[test]
    fn warns_when_no_booking_is_being_tracked() {
        let html = render_to_string(|| view! { <TrackDriverPage /> });
        assert!(html.contains("Track Your Driver"));
        assert!(html.contains("No active booking to track."));
        assert!(html.contains("id=\"track-map\""));
    }

    #[test]
    fn shows_the_driver_and_last_known_position() {
        let html = render_to_string(|| {
            provide_tracking(TrackQuery {
                booking_id: Some("bk-1".into()),
                driver_name: Some("John Smith".into()),
                initial_position: Some(LatLng::new(28.6692, 77.4538)),
            });
            view! { <TrackDriverPage /> }
        });
        assert!(html.contains("John Smith"));
        assert!(html.contains("On the way"));
        assert!(html.contains("Lat: 28.6692, Lng: 77.4538"));
        assert!(!html.contains("No active booking to track."));
    }

    #[test]
    fn shows_the_arrival_banner_once_reached() {
        let html = render_to_string(|| {
            let vm = TrackViewModel::new(TrackQuery {
                booking_id: Some("bk-1".into()),
                driver_name: Some("John Smith".into()),
                initial_position: None,
            });
            vm.reached.set(true);
            provide_context(vm);
            view! { <TrackDriverPage /> }
        });
        assert!(html.contains("Your driver has arrived!"));
        assert!(html.contains("Arrived at pickup"));
        assert!(html.contains("John Smith is waiting at the pickup location."));
    }
}
