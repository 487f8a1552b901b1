use crate::api::types::Role;
use crate::state::auth::use_auth;
use leptos::*;

/// Landing page. The hero call-to-action follows the session role: drivers
/// are pointed at the duty board, everyone else at the booking form.
#[component]
pub fn HomePage() -> impl IntoView {
    let (auth, _) = use_auth();
    let role = create_memo(move |_| auth.get().role());

    view! {
        <div class="min-h-screen bg-gray-50 font-sans">
            <section class="pt-24 pb-12 bg-gradient-to-r from-blue-500 to-blue-700 text-white text-center">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <h1 class="text-4xl md:text-5xl font-bold mb-4">
                        "Emergency Ambulance Services at Your Fingertips"
                    </h1>
                    <p class="text-lg md:text-xl mb-8">
                        "Book an ambulance instantly or join as a driver to save lives."
                    </p>
                    <Show when=move || shows_booking_cta(role.get())>
                        <a
                            href="/book"
                            class="bg-white text-blue-600 px-6 py-3 rounded-full font-semibold hover:bg-gray-100 transition duration-300"
                        >
                            "Book an Ambulance Now"
                        </a>
                    </Show>
                    <Show when=move || shows_duty_cta(role.get())>
                        <a
                            href="/driver-duty"
                            class="bg-white text-blue-600 px-6 py-3 rounded-full font-semibold hover:bg-gray-100 transition duration-300"
                        >
                            "Go to Duty"
                        </a>
                    </Show>
                </div>
            </section>

            <FeaturesSection/>
            <TestimonialsSection/>
            <AboutSection/>

            <section class="py-16 bg-blue-600 text-white text-center">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <h2 class="text-3xl font-bold mb-4">"Ready to Make a Difference?"</h2>
                    <p class="text-lg mb-8">
                        "Book an ambulance or join our driver network today."
                    </p>
                    <div class="flex justify-center space-x-4">
                        <Show when=move || shows_booking_cta(role.get())>
                            <a
                                href="/book"
                                class="bg-white text-blue-600 px-6 py-3 rounded-full font-semibold hover:bg-gray-100 transition duration-300"
                            >
                                "Book Now"
                            </a>
                        </Show>
                        <Show when=move || shows_driver_signup_cta(role.get())>
                            <a
                                href="/driver-register"
                                class="border border-white text-white px-6 py-3 rounded-full hover:bg-blue-700 transition duration-300"
                            >
                                "Become a Driver"
                            </a>
                        </Show>
                        <Show when=move || shows_duty_cta(role.get())>
                            <a
                                href="/driver-duty"
                                class="bg-white text-blue-600 px-6 py-3 rounded-full font-semibold hover:bg-gray-100 transition duration-300"
                            >
                                "Go to Duty"
                            </a>
                        </Show>
                    </div>
                </div>
            </section>
        </div>
    }
}

fn shows_booking_cta(role: Option<Role>) -> bool {
    role != Some(Role::Driver)
}

fn shows_duty_cta(role: Option<Role>) -> bool {
    role == Some(Role::Driver)
}

fn shows_driver_signup_cta(role: Option<Role>) -> bool {
    role != Some(Role::Customer)
}

#[component]
fn FeaturesSection() -> impl IntoView {
    let features = [
        (
            "🚑",
            "Instant Booking",
            "Book an ambulance in seconds with our easy-to-use platform.",
        ),
        (
            "📍",
            "Real-Time Tracking",
            "Track your ambulance's location in real-time for peace of mind.",
        ),
        (
            "👨‍🚒",
            "Driver Portal",
            "Join our network of drivers to respond to emergencies efficiently.",
        ),
        (
            "📞",
            "24/7 Support",
            "Our support team is available round-the-clock to assist you.",
        ),
    ];

    view! {
        <section class="py-16 bg-gray-50">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <h2 class="text-3xl font-bold text-gray-800 text-center mb-12">
                    "Why Choose Us?"
                </h2>
                <div class="grid grid-cols-1 md:grid-cols-4 gap-8">
                    {features
                        .into_iter()
                        .map(|(icon, title, description)| {
                            view! {
                                <div class="bg-white p-6 rounded-lg shadow-md hover:shadow-lg transition duration-300">
                                    <div class="text-4xl mb-4">{icon}</div>
                                    <h3 class="text-xl font-semibold text-gray-800 mb-2">{title}</h3>
                                    <p class="text-gray-600">{description}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn TestimonialsSection() -> impl IntoView {
    let testimonials = [
        (
            "Sarah M.",
            "Customer",
            "The app was a lifesaver! I booked an ambulance in minutes, and the tracking feature kept me informed.",
        ),
        (
            "John D.",
            "Driver",
            "Being part of this network is rewarding. The app makes it easy to respond to emergencies quickly.",
        ),
        (
            "Emily R.",
            "Customer",
            "The 24/7 support team was incredibly helpful during a stressful situation. Highly recommend!",
        ),
    ];

    view! {
        <section class="py-16 bg-white">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <h2 class="text-3xl font-bold text-gray-800 text-center mb-12">
                    "What Our Users Say"
                </h2>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                    {testimonials
                        .into_iter()
                        .map(|(name, role, text)| {
                            view! {
                                <div class="bg-gray-50 p-6 rounded-lg shadow-md hover:shadow-lg transition duration-300">
                                    <div class="mb-4">
                                        <h4 class="text-lg font-semibold text-gray-800">{name}</h4>
                                        <p class="text-sm text-gray-500">{role}</p>
                                    </div>
                                    <p class="text-gray-600 italic">{format!("\"{text}\"")}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="py-16 bg-gray-50">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex flex-col md:flex-row items-center">
                    <div class="md:w-1/2 mb-8 md:mb-0">
                        <img src="/ambulance-team.jpg" alt="Ambulance Team" class="rounded-lg shadow-lg"/>
                    </div>
                    <div class="md:w-1/2 md:pl-12">
                        <h2 class="text-3xl font-bold text-gray-800 mb-4">"About Us"</h2>
                        <p class="text-gray-600 mb-6">
                            "At Ambulance Tracker, we are dedicated to providing fast and \
                             reliable emergency services. Our platform connects customers \
                             with ambulances and empowers drivers to respond swiftly. With \
                             cutting-edge technology and a commitment to saving lives, we're \
                             here 24/7."
                        </p>
                        <a
                            href="/services"
                            class="bg-blue-600 text-white px-6 py-3 rounded-full hover:bg-blue-700 transition duration-300"
                        >
                            "Learn More"
                        </a>
                    </div>
                </div>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_cta_hidden_from_drivers() {
        assert!(shows_booking_cta(None));
        assert!(shows_booking_cta(Some(Role::Customer)));
        assert!(!shows_booking_cta(Some(Role::Driver)));
    }

    #[test]
    fn duty_cta_only_for_drivers() {
        assert!(!shows_duty_cta(None));
        assert!(!shows_duty_cta(Some(Role::Customer)));
        assert!(shows_duty_cta(Some(Role::Driver)));
    }

    #[test]
    fn driver_signup_cta_hidden_from_customers() {
        assert!(shows_driver_signup_cta(None));
        assert!(!shows_driver_signup_cta(Some(Role::Customer)));
        assert!(shows_driver_signup_cta(Some(Role::Driver)));
    }
}
