use crate::{
    api::types::{ApiError, Role},
    components::{error::InlineErrorMessage, layout::SuccessMessage},
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginForm(
    role: ReadSignal<Role>,
    email: ReadSignal<String>,
    password: ReadSignal<String>,
    show_password: ReadSignal<bool>,
    error: Signal<Option<ApiError>>,
    success: Signal<Option<String>>,
    pending: Signal<bool>,
    on_role_change: Callback<String>,
    on_email_input: Callback<String>,
    on_password_input: Callback<String>,
    on_toggle_password: Callback<()>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    view! {
        <section class="pt-24 pb-16 flex items-center justify-center">
            <div class="max-w-md w-full bg-white p-8 rounded-lg shadow-lg">
                <h2 class="text-3xl font-bold text-gray-800 text-center mb-6">
                    "Login to Your Account"
                </h2>
                <InlineErrorMessage error=error />
                {move || {
                    success
                        .get()
                        .map(|message| view! { <SuccessMessage message=message /> })
                }}
                <form on:submit=move |ev| on_submit.call(ev)>
                    <div class="mb-4">
                        <label for="role" class="block text-gray-700 font-semibold mb-2">
                            "Login As"
                        </label>
                        <select
                            id="role"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-700"
                            on:change=move |ev| on_role_change.call(event_target_value(&ev))
                            prop:value=move || role.get().as_str().to_string()
                        >
                            <option value="customer">"Customer"</option>
                            <option value="driver">"Driver"</option>
                        </select>
                    </div>
                    <div class="mb-4">
                        <label for="email" class="block text-gray-700 font-semibold mb-2">
                            "Email"
                        </label>
                        <input
                            type="email"
                            id="email"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-700"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| on_email_input.call(event_target_value(&ev))
                        />
                    </div>
                    <div class="mb-6 relative">
                        <label for="password" class="block text-gray-700 font-semibold mb-2">
                            "Password"
                        </label>
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            id="password"
                            class="w-full px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-600 text-gray-700"
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| on_password_input.call(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="absolute right-3 top-10 text-gray-500"
                            on:click=move |_| on_toggle_password.call(())
                        >
                            {move || if show_password.get() { "Hide" } else { "Show" }}
                        </button>
                    </div>
                    <button
                        type="submit"
                        class="w-full bg-blue-600 text-white px-4 py-2 rounded-full hover:bg-blue-700 transition duration-300 disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        "Login"
                    </button>
                </form>
                <p class="text-center text-gray-600 mt-4">
                    "Don't have an account? "
                    <a href="/signup" class="text-blue-600 hover:underline">
                        "Sign Up"
                    </a>
                </p>
            </div>
        </section>
    }
}
