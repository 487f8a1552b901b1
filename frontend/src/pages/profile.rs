use crate::state::auth::use_auth;
use leptos::*;

/// Account overview for the signed-in user. Routing wraps this in the auth
/// guard, so the page itself only reads from the session.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let (auth, _) = use_auth();
    let display_name = create_memo(move |_| auth.get().display_name());
    let email = create_memo(move |_| {
        auth.get()
            .user
            .and_then(|user| user.email)
            .unwrap_or_default()
    });
    let avatar_url = move || {
        format!(
            "https://ui-avatars.com/api/?name={}&size=64",
            display_name.get()
        )
    };

    view! {
        <div class="min-h-screen bg-gray-50 font-sans">
            <section class="pt-24 pb-12 bg-gradient-to-r from-[#df4040] to-[#df4040] text-white text-center">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <h1 class="text-4xl md:text-5xl font-bold mb-4">
                        {move || format!("Welcome, {}!", display_name.get())}
                    </h1>
                    <p class="text-lg md:text-xl mb-8">
                        "Manage your profile and view your booking history."
                    </p>
                    <a
                        href="/book"
                        class="bg-white text-[#df4040] px-6 py-3 rounded-full font-semibold hover:bg-gray-100 transition duration-300"
                    >
                        "Book an Ambulance"
                    </a>
                </div>
            </section>

            <section class="py-16 bg-white">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <h2 class="text-3xl font-bold text-gray-800 mb-8">"Your Profile"</h2>
                    <div class="bg-gray-50 p-6 rounded-lg shadow-md">
                        <div class="flex items-center mb-6">
                            <img
                                src=avatar_url
                                alt="Profile"
                                class="h-16 w-16 rounded-full mr-4"
                            />
                            <div>
                                <h3 class="text-xl font-semibold text-gray-800">
                                    {move || display_name.get()}
                                </h3>
                                <p class="text-gray-600">{move || email.get()}</p>
                            </div>
                        </div>
                        <div>
                            <h4 class="text-lg font-semibold text-gray-800 mb-4">
                                "Booking History"
                            </h4>
                            <p class="text-gray-600">
                                "No recent bookings. Book an ambulance to get started!"
                            </p>
                            <div class="mt-4">
                                <a
                                    href="/book"
                                    class="border border-[#df4040] text-[#df4040] px-4 py-2 rounded-full hover:bg-blue-50 transition duration-300"
                                >
                                    "Book Now"
                                </a>
                            </div>
                        </div>
                    </div>
                </div>
            </section>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{customer_user, provide_auth};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn greets_the_signed_in_user_with_their_email() {
        let html = render_to_string(move || {
            provide_auth(Some(customer_user()));
            view! { <ProfilePage /> }
        });
        assert!(html.contains("Welcome, Asha!"));
        assert!(html.contains("asha@example.com"));
    }

    #[test]
    fn falls_back_to_a_generic_greeting() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! { <ProfilePage /> }
        });
        assert!(html.contains("Welcome, User!"));
    }
}
