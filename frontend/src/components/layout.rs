use crate::state::auth::{self, use_auth};
use leptos::*;

#[component]
pub fn Navbar() -> impl IntoView {
    let (auth, set_auth) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let display_name = create_memo(move |_| auth.get().display_name());

    let on_logout = move |_| {
        set_menu_open.set(false);
        auth::logout(set_auth);
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/login");
        }
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <nav class="bg-white shadow-lg fixed w-full z-10">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between h-16">
                    <div class="flex items-center">
                        <a href="/" class="flex items-center">
                            <img src="/ambulance-logo.png" alt="Ambulance Tracker" class="h-10 w-10"/>
                            <span class="ml-2 text-xl font-bold text-blue-600">
                                "Ambulance Tracker"
                            </span>
                        </a>
                    </div>
                    <div class="hidden md:flex items-center space-x-8">
                        <a href="/services" class="text-gray-700 hover:text-blue-600 transition duration-300">
                            "Services"
                        </a>
                        <a
                            href="/book"
                            class="bg-blue-600 text-white px-4 py-2 rounded-full hover:bg-blue-700 transition duration-300"
                        >
                            "Book Now"
                        </a>
                        <Show
                            when=move || is_authenticated.get()
                            fallback=|| {
                                view! {
                                    <a
                                        href="/login"
                                        class="border border-blue-600 text-blue-600 px-4 py-2 rounded-full hover:bg-blue-50 transition duration-300"
                                    >
                                        "Login"
                                    </a>
                                }
                            }
                        >
                            <a href="/profile" class="text-gray-700 hover:text-blue-600 transition duration-300">
                                {move || display_name.get()}
                            </a>
                            <button
                                on:click=on_logout
                                class="border border-blue-600 text-blue-600 px-4 py-2 rounded-full hover:bg-blue-50 transition duration-300"
                            >
                                "Logout"
                            </button>
                        </Show>
                    </div>
                    <div class="md:hidden flex items-center">
                        <button on:click=toggle_menu class="text-gray-700 focus:outline-none">
                            <svg class="h-6 w-6" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                <Show
                                    when=move || menu_open.get()
                                    fallback=|| {
                                        view! {
                                            <path
                                                stroke-linecap="round"
                                                stroke-linejoin="round"
                                                stroke-width="2"
                                                d="M4 6h16M4 12h16M4 18h16"
                                            />
                                        }
                                    }
                                >
                                    <path
                                        stroke-linecap="round"
                                        stroke-linejoin="round"
                                        stroke-width="2"
                                        d="M6 18L18 6M6 6l12 12"
                                    />
                                </Show>
                            </svg>
                        </button>
                    </div>
                </div>
            </div>
            <Show when=move || menu_open.get()>
                <div class="md:hidden bg-white shadow-lg">
                    <div class="px-4 pt-2 pb-4 space-y-2">
                        <a
                            href="/services"
                            class="block text-gray-700 hover:text-blue-600 transition duration-300"
                            on:click=move |_| set_menu_open.set(false)
                        >
                            "Services"
                        </a>
                        <a
                            href="/book"
                            class="block text-gray-700 hover:text-blue-600 transition duration-300"
                            on:click=move |_| set_menu_open.set(false)
                        >
                            "Book Now"
                        </a>
                        <Show
                            when=move || is_authenticated.get()
                            fallback=|| {
                                view! {
                                    <a
                                        href="/login"
                                        class="block text-gray-700 hover:text-blue-600 transition duration-300"
                                    >
                                        "Login"
                                    </a>
                                }
                            }
                        >
                            <a
                                href="/profile"
                                class="block text-gray-700 hover:text-blue-600 transition duration-300"
                                on:click=move |_| set_menu_open.set(false)
                            >
                                {move || display_name.get()}
                            </a>
                            <button
                                on:click=on_logout
                                class="block w-full text-left text-gray-700 hover:text-blue-600 transition duration-300"
                            >
                                "Logout"
                            </button>
                        </Show>
                    </div>
                </div>
            </Show>
        </nav>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-gray-800 text-white py-8">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                    <div>
                        <h3 class="text-lg font-semibold mb-4">"Ambulance Tracker"</h3>
                        <p class="text-gray-400">
                            "Connecting you to emergency services, anytime, anywhere."
                        </p>
                    </div>
                    <div>
                        <h3 class="text-lg font-semibold mb-4">"Quick Links"</h3>
                        <ul class="space-y-2">
                            <li>
                                <a href="/services" class="text-gray-400 hover:text-white transition duration-300">
                                    "Services"
                                </a>
                            </li>
                            <li>
                                <a href="/book" class="text-gray-400 hover:text-white transition duration-300">
                                    "Book Now"
                                </a>
                            </li>
                        </ul>
                    </div>
                    <div>
                        <h3 class="text-lg font-semibold mb-4">"Contact Us"</h3>
                        <p class="text-gray-400">
                            "Email: support@ambulancetracker.com"
                            <br/>
                            "Phone: +1-800-123-4567"
                        </p>
                    </div>
                </div>
                <div class="mt-8 text-center text-gray-400">
                    "© 2025 Ambulance Tracker. All rights reserved."
                </div>
            </div>
        </footer>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50 font-sans">
            <Navbar/>
            <main>{children()}</main>
            <Footer/>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-blue-600"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-red-100 border border-red-300 text-red-700 px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-green-100 border border-green-300 text-green-700 px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}
