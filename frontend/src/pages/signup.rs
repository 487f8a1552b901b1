use crate::{
    api::{
        client::ApiClient,
        types::{ApiError, Role, SignupRequest},
    },
    components::{error::InlineErrorMessage, layout::SuccessMessage},
    utils::validate,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (user_type, set_user_type) = create_signal(Role::Customer);
    let (show_password, set_show_password) = create_signal(false);
    let error = create_rw_signal(None::<ApiError>);
    let success = create_rw_signal(None::<String>);

    let signup_action = create_action(move |input: &(Role, SignupRequest)| {
        let api = api.clone();
        let (role, request) = input.clone();
        async move { api.signup(role, &request).await }
    });
    let pending = signup_action.pending();

    create_effect(move |_| {
        if let Some(result) = signup_action.value().get() {
            match result {
                Ok(response) => {
                    error.set(None);
                    let message = if response.message.is_empty() {
                        "Account created successfully!".to_string()
                    } else {
                        response.message
                    };
                    success.set(Some(message));
                    if let Some(win) = web_sys::window() {
                        let _ = win.location().set_href("/login");
                    }
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
        let name_value = name.get_untracked();
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Err(message) =
            validate::validate_signup(&name_value, &email_value, &password_value)
        {
            error.set(Some(ApiError::validation(message)));
            return;
        }
        error.set(None);
        signup_action.dispatch((
            user_type.get_untracked(),
            SignupRequest {
                name: name_value,
                email: email_value,
                password: password_value,
            },
        ));
    };

    view! {
        <section class="pt-24 pb-16 flex items-center justify-center">
            <div class="max-w-md w-full bg-white p-8 rounded-lg shadow-lg">
                <h2 class="text-3xl font-bold text-gray-800 text-center mb-6">
                    "Create Your Account"
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
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600"
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
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="mb-4 relative">
                        <label for="password" class="block text-gray-700 font-semibold mb-2">
                            "Password"
                        </label>
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            id="password"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600"
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="absolute right-3 top-10 text-gray-500"
                            on:click=move |_| set_show_password.update(|visible| *visible = !*visible)
                        >
                            {move || if show_password.get() { "Hide" } else { "Show" }}
                        </button>
                    </div>
                    <div class="mb-6">
                        <label for="userType" class="block text-gray-700 font-semibold mb-2">
                            "User Type"
                        </label>
                        <select
                            id="userType"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600"
                            on:change=move |ev| {
                                if let Some(parsed) = Role::parse(&event_target_value(&ev)) {
                                    set_user_type.set(parsed);
                                }
                            }
                            prop:value=move || user_type.get().as_str().to_string()
                        >
                            <option value="customer">"Customer"</option>
                            <option value="driver">"Driver"</option>
                        </select>
                    </div>
                    <button
                        type="submit"
                        class="w-full bg-blue-600 text-white px-4 py-2 rounded-full hover:bg-blue-700 transition duration-300 disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        "Sign Up"
                    </button>
                </form>
                <p class="text-center text-gray-600 mt-4">
                    "Already have an account? "
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
    fn renders_all_signup_fields() {
        let html = render_to_string(|| view! { <SignupPage /> });
        assert!(html.contains("Create Your Account"));
        assert!(html.contains("Full Name"));
        assert!(html.contains("User Type"));
        assert!(html.contains("Sign Up"));
        assert!(html.contains("Already have an account?"));
    }
}
