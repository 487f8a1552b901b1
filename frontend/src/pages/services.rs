use leptos::*;

#[component]
pub fn ServicesPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50 font-sans">
            <section class="pt-24 pb-12 bg-gradient-to-r from-blue-500 to-blue-700 text-white text-center">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <h1 class="text-4xl md:text-5xl font-bold mb-4">"Our Services"</h1>
                    <p class="text-lg md:text-xl mb-8">
                        "Discover how we make emergency medical transport accessible and efficient."
                    </p>
                    <a
                        href="/book"
                        class="bg-white text-blue-600 px-6 py-3 rounded-full font-semibold hover:bg-gray-100 transition duration-300"
                    >
                        "Book an Ambulance Now"
                    </a>
                </div>
            </section>

            <section class="py-16 bg-white">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <h2 class="text-3xl font-bold text-gray-800 text-center mb-12">
                        "What We Offer"
                    </h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
                        <div class="bg-gray-50 p-6 rounded-lg shadow-md">
                            <h3 class="text-xl font-semibold text-blue-600 mb-4">
                                "Book an Ambulance"
                            </h3>
                            <p class="text-gray-600 mb-6">
                                "Instantly book an ambulance with real-time tracking and \
                                 estimated arrival times. Our service ensures quick response for \
                                 emergencies, with trained medical staff on board."
                            </p>
                            <a
                                href="/book"
                                class="bg-blue-600 text-white px-4 py-2 rounded-full hover:bg-blue-700 transition duration-300"
                            >
                                "Book Now"
                            </a>
                        </div>
                        <div class="bg-gray-50 p-6 rounded-lg shadow-md">
                            <h3 class="text-xl font-semibold text-blue-600 mb-4">
                                "Become a Driver"
                            </h3>
                            <p class="text-gray-600 mb-6">
                                "Join our network of ambulance drivers and make a difference. \
                                 Register, get verified, and start responding to emergency calls \
                                 in your area."
                            </p>
                            <a
                                href="/driver-register"
                                class="border border-blue-600 text-blue-600 px-4 py-2 rounded-full hover:bg-blue-50 transition duration-300"
                            >
                                "Register as a Driver"
                            </a>
                        </div>
                    </div>
                </div>
            </section>

            <section class="py-16 bg-blue-600 text-white text-center">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <h2 class="text-3xl font-bold mb-4">"Need Help Right Now?"</h2>
                    <p class="text-lg mb-8">
                        "Book an ambulance or join our driver network to save lives."
                    </p>
                    <a
                        href="/book"
                        class="bg-white text-blue-600 px-6 py-3 rounded-full font-semibold hover:bg-gray-100 transition duration-300"
                    >
                        "Book an Ambulance"
                    </a>
                </div>
            </section>
        </div>
    }
}
