use crate::{
    api::{
        client::ApiClient,
        types::{ApiError, DriverApplicationRequest},
    },
    components::{error::InlineErrorMessage, layout::SuccessMessage},
    utils::validate,
};
use leptos::{ev::SubmitEvent, *};

const VEHICLE_TYPES: [&str; 3] = [
    "Standard Ambulance",
    "Advanced Life Support",
    "Neonatal Ambulance",
];

#[component]
pub fn DriverRegisterPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (phone, set_phone) = create_signal(String::new());
    let (license_number, set_license_number) = create_signal(String::new());
    let (vehicle_type, set_vehicle_type) = create_signal(String::new());
    let (vehicle_registration, set_vehicle_registration) = create_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);
    let success = create_rw_signal(None::<String>);

    let submit_action = create_action(move |request: &DriverApplicationRequest| {
        let api = api.clone();
        let request = request.clone();
        async move { api.driver_application(&request).await }
    });
    let pending = submit_action.pending();

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    success.set(Some(
                        "Your application is pending. Admin will update you soon.".to_string(),
                    ));
                    set_name.set(String::new());
                    set_email.set(String::new());
                    set_phone.set(String::new());
                    set_license_number.set(String::new());
                    set_vehicle_type.set(String::new());
                    set_vehicle_registration.set(String::new());
                }
                Err(err) => {
                    success.set(None);
                    error.set(Some(err));
                }
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let request = DriverApplicationRequest {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            license_number: license_number.get_untracked(),
            vehicle_type: vehicle_type.get_untracked(),
            vehicle_registration: vehicle_registration.get_untracked(),
        };
        if let Err(message) = validate::validate_driver_application(&request) {
            error.set(Some(ApiError::validation(message)));
            return;
        }
        error.set(None);
        submit_action.dispatch(request);
    };

    view! {
        <section class="pt-24 pb-16 flex items-center justify-center">
            <div class="max-w-md w-full bg-white p-8 rounded-lg shadow-lg">
                <h2 class="text-3xl font-bold text-gray-800 text-center mb-6">
                    "Driver Registration"
                </h2>
                <InlineErrorMessage error=error.read_only().into() />
                {move || {
                    success
                        .get()
                        .map(|message| view! { <SuccessMessage message=message /> })
                }}
                <form on:submit=handle_submit>
                    <div class="mb-4">
                        <label for="name" class="block text-gray-700 font-semibold mb-2">
                            "Full Name"
                        </label>
                        <input
                            type="text"
                            id="name"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-900"
                            placeholder="Enter your full name"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="mb-4">
                        <label for="email" class="block text-gray-700 font-semibold mb-2">
                            "Email"
                        </label>
                        <input
                            type="email"
                            id="email"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-900"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="mb-4">
                        <label for="phone" class="block text-gray-700 font-semibold mb-2">
                            "Phone Number"
                        </label>
                        <input
                            type="text"
                            id="phone"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-900"
                            placeholder="Enter your phone number"
                            prop:value=move || phone.get()
                            on:input=move |ev| set_phone.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="mb-4">
                        <label for="licenseNumber" class="block text-gray-700 font-semibold mb-2">
                            "Driver License Number"
                        </label>
                        <input
                            type="text"
                            id="licenseNumber"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-900"
                            placeholder="Enter your license number"
                            prop:value=move || license_number.get()
                            on:input=move |ev| set_license_number.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="mb-4">
                        <label for="vehicleType" class="block text-gray-700 font-semibold mb-2">
                            "Vehicle Type"
                        </label>
                        <select
                            id="vehicleType"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-900"
                            on:change=move |ev| set_vehicle_type.set(event_target_value(&ev))
                            prop:value=move || vehicle_type.get()
                        >
                            <option value="">"Select vehicle type"</option>
                            {VEHICLE_TYPES
                                .into_iter()
                                .map(|kind| view! { <option value=kind>{kind}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="mb-6">
                        <label
                            for="vehicleRegistration"
                            class="block text-gray-700 font-semibold mb-2"
                        >
                            "Vehicle Registration Number"
                        </label>
                        <input
                            type="text"
                            id="vehicleRegistration"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-900"
                            placeholder="Enter vehicle registration number"
                            prop:value=move || vehicle_registration.get()
                            on:input=move |ev| set_vehicle_registration.set(event_target_value(&ev))
                        />
                    </div>
                    <button
                        type="submit"
                        class="w-full bg-blue-600 text-white px-4 py-2 rounded-full hover:bg-blue-700 transition duration-300 disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        "Submit Application"
                    </button>
                </form>
                <p class="text-center text-gray-600 mt-4">
                    "Already registered? "
                    <a href="/login" class="text-blue-600 hover:underline">
                        "Login"
                    </a>
                </p>
            </div>
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_the_full_application_form() {
        let html = render_to_string(|| view! { <DriverRegisterPage /> });
        assert!(html.contains("Driver Registration"));
        assert!(html.contains("Driver License Number"));
        assert!(html.contains("Select vehicle type"));
        assert!(html.contains("Neonatal Ambulance"));
        assert!(html.contains("Submit Application"));
    }
}
