use leptos::*;

use crate::components::{
    common::ButtonVariant,
    confirm_dialog::ConfirmDialog,
    error::InlineErrorMessage,
    layout::SuccessMessage,
};
use crate::pages::driver_duty::{utils, view_model::use_duty_view_model};
use crate::state::dispatch::{DispatchPhase, DispatchState};

#[component]
pub fn DriverDutyPage() -> impl IntoView {
    let vm = use_duty_view_model();
    let state = vm.state;
    let error = vm.error;
    let notice = vm.notice;
    let toggling = vm.toggle_action.pending();
    let on_toggle = vm.handle_toggle_duty();
    let on_accept = Callback::new(vm.handle_accept());
    let on_skip = Callback::new(vm.handle_skip());
    let on_reached = Callback::new(vm.handle_reached());

    let on_duty = create_memo(move |_| state.get().on_duty);
    let offer_open = Signal::derive(move || {
        matches!(state.get().phase, DispatchPhase::OfferReceived { .. })
    });
    let offer_message = Signal::derive(move || match &state.get().phase {
        DispatchPhase::OfferReceived { offer } => utils::offer_message(offer),
        _ => String::new(),
    });

    view! {
        <section class="pt-24 pb-16 flex items-center justify-center px-4">
            <div class="max-w-md w-full bg-white p-8 rounded-lg shadow-lg">
                <h2 class="text-3xl font-bold text-gray-800 text-center mb-6">
                    "Driver Duty Status"
                </h2>
                <InlineErrorMessage error=error.read_only().into() />
                {move || notice.get().map(|message| view! { <SuccessMessage message=message /> })}
                <div class="flex items-center justify-between mb-6">
                    <span class="text-lg font-semibold text-gray-700">
                        {move || format!("Duty Status: {}", utils::duty_label(on_duty.get()))}
                    </span>
                    <label class="relative inline-flex items-center cursor-pointer">
                        <input
                            type="checkbox"
                            prop:checked=move || on_duty.get()
                            disabled=move || toggling.get()
                            on:change=on_toggle
                            class="sr-only peer"
                        />
                        <div class="w-11 h-6 bg-gray-200 rounded-full peer peer-checked:bg-blue-600 transition duration-300"></div>
                        <div class="absolute w-5 h-5 bg-white rounded-full top-0.5 left-0.5 peer-checked:translate-x-5 transition duration-300"></div>
                    </label>
                </div>
                <p class="text-gray-600 text-center">
                    "Toggle your duty status to start or stop receiving booking requests."
                </p>
                <Show when=move || show_listening_banner(&state.get())>
                    <div class="mt-6 p-4 bg-blue-50 rounded-lg border border-blue-200">
                        <p class="text-blue-700 text-center font-medium">
                            "You are now on duty! You will receive service requests soon. \
                             Stay tuned for incoming bookings."
                        </p>
                    </div>
                </Show>
                {move || assignment_panel(state.get(), on_reached)}
            </div>
            <ConfirmDialog
                is_open=offer_open
                title="New Booking Request"
                message=offer_message
                on_confirm=on_accept
                on_cancel=on_skip
                confirm_label="Accept"
                cancel_label="Skip"
                confirm_variant=ButtonVariant::Success
                cancel_variant=ButtonVariant::Danger
            />
        </section>
    }
}

fn show_listening_banner(state: &DispatchState) -> bool {
    state.on_duty && matches!(state.phase, DispatchPhase::Idle)
}

fn assignment_panel(
    state: DispatchState,
    on_reached: Callback<()>,
) -> View {
    match state.phase {
        DispatchPhase::Assigned { assignment } | DispatchPhase::EnRoute { assignment } => view! {
            <div class="mt-6 p-4 bg-gray-100 rounded-lg">
                <h3 class="text-lg font-semibold text-gray-800">"Active Booking"</h3>
                <p class="text-gray-700">
                    <strong>"Booking: "</strong>
                    {assignment.booking_id}
                </p>
                <p class="text-gray-700">
                    <strong>"Pickup: "</strong>
                    {assignment.pickup.display()}
                </p>
                <p class="text-gray-600 text-sm mt-2">
                    "Your live location is being shared with the customer."
                </p>
                <button
                    type="button"
                    class="mt-3 w-full bg-green-500 text-white px-4 py-2 rounded-full hover:bg-green-600 transition duration-300"
                    on:click=move |_| on_reached.call(())
                >
                    "Mark as Reached"
                </button>
            </div>
        }
        .into_view(),
        DispatchPhase::Arrived { booking_id } => view! {
            <div class="mt-6 p-4 bg-green-100 rounded-lg">
                <h3 class="text-lg font-semibold text-green-800">"Pickup reached"</h3>
                <p class="text-gray-700">
                    {format!("Booking {} is complete on your side.", booking_id)}
                </p>
                <p class="text-gray-600 text-sm mt-2">
                    "Stay on duty to keep receiving new booking requests."
                </p>
            </div>
        }
        .into_view(),
        _ => ().into_view(),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::maps::LatLng;
    use crate::state::dispatch::{Assignment, BookingOffer};
    use crate::test_support::helpers::{driver_user, provide_auth};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_the_toggle_card_for_an_off_duty_driver() {
        let html = render_to_string(move || {
            provide_auth(Some(driver_user()));
            view! { <DriverDutyPage /> }
        });
        assert!(html.contains("Driver Duty Status"));
        assert!(html.contains("Duty Status: Off"));
        assert!(html.contains("Toggle your duty status"));
        assert!(!html.contains("You are now on duty!"));
        assert!(!html.contains("role=\"dialog\""));
    }

    #[test]
    fn shows_the_listening_banner_while_on_duty() {
        let html = render_to_string(move || {
            provide_auth(Some(driver_user()));
            let vm = use_duty_view_model();
            vm.state.set(DispatchState {
                on_duty: true,
                phase: DispatchPhase::Idle,
            });
            view! { <DriverDutyPage /> }
        });
        assert!(html.contains("Duty Status: On"));
        assert!(html.contains("You are now on duty!"));
    }

    #[test]
    fn opens_the_offer_dialog_with_the_pickup_address() {
        let html = render_to_string(move || {
            provide_auth(Some(driver_user()));
            let vm = use_duty_view_model();
            vm.state.set(DispatchState {
                on_duty: true,
                phase: DispatchPhase::OfferReceived {
                    offer: BookingOffer {
                        booking_id: "bk-1".into(),
                        pickup: LatLng::new(28.6692, 77.4538),
                        pickup_address: Some("12 Hospital Road".into()),
                    },
                },
            });
            view! { <DriverDutyPage /> }
        });
        assert!(html.contains("New Booking Request"));
        assert!(html.contains("Pickup: 12 Hospital Road"));
        assert!(html.contains("Accept"));
        assert!(html.contains("Skip"));
    }

    #[test]
    fn shows_the_assignment_card_while_en_route() {
        let html = render_to_string(move || {
            provide_auth(Some(driver_user()));
            let vm = use_duty_view_model();
            vm.state.set(DispatchState {
                on_duty: true,
                phase: DispatchPhase::EnRoute {
                    assignment: Assignment {
                        booking_id: "bk-42".into(),
                        pickup: LatLng::new(28.7, 77.4),
                    },
                },
            });
            view! { <DriverDutyPage /> }
        });
        assert!(html.contains("Active Booking"));
        assert!(html.contains("bk-42"));
        assert!(html.contains("Lat: 28.7000, Lng: 77.4000"));
        assert!(html.contains("Mark as Reached"));
        assert!(!html.contains("You are now on duty!"));
    }

    #[test]
    fn shows_the_reached_banner_after_arrival() {
        let html = render_to_string(move || {
            provide_auth(Some(driver_user()));
            let vm = use_duty_view_model();
            vm.state.set(DispatchState {
                on_duty: true,
                phase: DispatchPhase::Arrived {
                    booking_id: "bk-42".into(),
                },
            });
            view! { <DriverDutyPage /> }
        });
        assert!(html.contains("Pickup reached"));
        assert!(html.contains("Booking bk-42 is complete on your side."));
        assert!(!html.contains("Mark as Reached"));
    }
}
