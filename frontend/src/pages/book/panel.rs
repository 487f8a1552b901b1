use leptos::*;

use crate::components::{
    error::InlineErrorMessage,
    layout::{ErrorMessage, SuccessMessage},
};
use crate::pages::book::{
    utils::{self, BookingKind},
    view_model::{use_book_view_model, DIRECTIONS_PANEL_ID, DROP_INPUT_ID, MAP_ID, PICKUP_INPUT_ID},
};
use crate::state::booking::BookingPhase;

#[component]
pub fn BookPage() -> impl IntoView {
    let vm = use_book_view_model();
    let booking_type = vm.booking_type;
    let phase = vm.phase;
    let error = vm.error;
    let success = vm.success;
    let locating = vm.locating;
    let maps_error = vm.maps_error;
    let pending = vm.submit_action.pending();
    let on_submit = vm.handle_submit();
    let on_use_current_location = vm.handle_use_current_location();
    let on_retry_maps = Callback::new(vm.handle_retry_maps());
    let on_reset = Callback::new(vm.handle_reset());

    view! {
        <section class="pt-24 pb-16 flex flex-col lg:flex-row">
            <div class="lg:w-1/3 bg-white p-8 shadow-lg lg:sticky lg:top-24 mx-4 lg:mx-0 rounded-lg">
                <h2 class="text-3xl font-bold text-gray-800 mb-6">"Book an Ambulance"</h2>
                <InlineErrorMessage error=error.read_only().into() />
                {move || {
                    success
                        .get()
                        .map(|message| view! { <SuccessMessage message=message /> })
                }}
                <form on:submit=on_submit>
                    <div class="mb-6">
                        <label class="block text-gray-700 font-semibold mb-2">"Booking Type"</label>
                        <div class="flex space-x-4">
                            {[BookingKind::Emergency, BookingKind::NonEmergency]
                                .into_iter()
                                .map(|kind| {
                                    view! {
                                        <label class="flex items-center">
                                            <input
                                                type="radio"
                                                name="bookingType"
                                                prop:checked=move || booking_type.get() == kind
                                                on:change=move |_| booking_type.set(kind)
                                                class="mr-2"
                                            />
                                            <span class="text-gray-700">{kind.label()}</span>
                                        </label>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                    <div class="mb-4">
                        <label
                            for=PICKUP_INPUT_ID
                            class="block text-gray-700 font-semibold mb-2"
                        >
                            "Pickup Location"
                        </label>
                        <div class="flex space-x-2">
                            <input
                                type="text"
                                id=PICKUP_INPUT_ID
                                placeholder="Enter pickup location"
                                class="flex-grow px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-900"
                            />
                            <button
                                type="button"
                                class="bg-blue-600 text-white px-4 py-2 rounded-lg hover:bg-blue-700 transition duration-300 disabled:opacity-50"
                                disabled=move || locating.get()
                                on:click=on_use_current_location
                            >
                                {move || if locating.get() { "Locating..." } else { "Use Current Location" }}
                            </button>
                        </div>
                    </div>
                    <div class="mb-4">
                        <label for=DROP_INPUT_ID class="block text-gray-700 font-semibold mb-2">
                            "Drop-off Location"
                        </label>
                        <input
                            type="text"
                            id=DROP_INPUT_ID
                            placeholder="Enter drop-off location"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-900"
                        />
                    </div>
                    {move || {
                        phase
                            .get()
                            .quote()
                            .cloned()
                            .map(|quote| {
                                view! {
                                    <div class="mb-6">
                                        <p class="text-gray-700">
                                            <strong>"Distance: "</strong>
                                            {quote.distance_text}
                                        </p>
                                        <p class="text-gray-700">
                                            <strong>"Duration: "</strong>
                                            {quote.duration_text}
                                        </p>
                                        <p class="text-gray-700">
                                            <strong>"Fare: "</strong>
                                            {utils::format_fare(quote.fare)}
                                        </p>
                                    </div>
                                }
                            })
                    }}
                    <button
                        type="submit"
                        class="w-full bg-blue-600 text-white px-4 py-2 rounded-full hover:bg-blue-700 transition duration-300 disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Requesting..." } else { "Confirm Booking" }}
                    </button>
                </form>
                {move || booking_status_panel(phase.get(), on_reset)}
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
                <div
                    id=DIRECTIONS_PANEL_ID
                    class="bg-white p-4 overflow-auto border-t border-gray-200 lg:border-l lg:border-t-0"
                ></div>
            </div>
        </section>
    }
}

fn booking_status_panel(
    phase: BookingPhase,
    on_reset: Callback<leptos::ev::MouseEvent>,
) -> View {
    match phase {
        BookingPhase::Submitted { .. } => view! {
            <div class="mt-6 p-4 bg-gray-100 rounded-lg">
                <h3 class="text-lg font-semibold text-gray-800">"Booking Confirmed"</h3>
                <p class="text-gray-700">
                    "Waiting for a nearby driver to accept your request..."
                </p>
            </div>
        }
        .into_view(),
        BookingPhase::DriverAssigned { booking_id, driver } => {
            let href = utils::track_driver_href(&booking_id, &driver);
            let location = driver.coordinates.map(|coordinates| {
                view! {
                    <p class="text-gray-700">
                        <strong>"Driver Location: "</strong>
                        {coordinates.display()}
                    </p>
                }
            });
            view! {
                <div class="mt-6 p-4 bg-gray-100 rounded-lg">
                    <h3 class="text-lg font-semibold text-gray-800">"Booking Confirmed"</h3>
                    <p class="text-gray-700">
                        {format!("{} accepted your request and is on the way.", driver.name)}
                    </p>
                    {location}
                    <a
                        href=href
                        class="inline-block mt-3 bg-blue-600 text-white px-4 py-2 rounded-full hover:bg-blue-700 transition duration-300"
                    >
                        "Track Driver"
                    </a>
                </div>
            }
            .into_view()
        }
        BookingPhase::Arrived { driver, .. } => view! {
            <div class="mt-6 p-4 bg-green-100 rounded-lg">
                <h3 class="text-lg font-semibold text-green-800">"Your driver has arrived!"</h3>
                <p class="text-gray-700">
                    {format!("{} is waiting at the pickup location.", driver.name)}
                </p>
                <button
                    type="button"
                    class="mt-3 bg-blue-600 text-white px-4 py-2 rounded-full hover:bg-blue-700 transition duration-300"
                    on:click=move |ev| on_reset.call(ev)
                >
                    "Book Another Ambulance"
                </button>
            </div>
        }
        .into_view(),
        _ => ().into_view(),
    }
}
