use leptos::*;
use leptos_router::*;

use crate::{
    api::{types::Role, ApiClient},
    components::{
        guard::{RequireAuth, RequireRole},
        layout::Layout,
    },
    pages::{
        book::BookPage, driver_duty::DriverDutyPage, driver_register::DriverRegisterPage,
        home::HomePage, login::LoginPage, profile::ProfilePage, services::ServicesPage,
        signup::SignupPage, track_driver::TrackDriverPage,
    },
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/signup",
    "/driver-register",
    "/services",
    "/book",
    "/driver-duty",
    "/track-driver",
    "/profile",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/book", "/driver-duty", "/track-driver", "/profile"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login", "/signup", "/driver-register", "/services"];

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    let realtime = crate::realtime::provide_realtime();
    #[cfg(target_arch = "wasm32")]
    spawn_local(async move {
        if let Err(err) = realtime.connect().await {
            log::error!("realtime connect failed: {err}");
        }
    });
    #[cfg(not(target_arch = "wasm32"))]
    let _ = realtime;
    view! {
        <AuthProvider>
            <Router>
                <Layout>
                    <Routes>
                        <Route path="/" view=HomePage/>
                        <Route path="/login" view=LoginPage/>
                        <Route path="/signup" view=SignupPage/>
                        <Route path="/driver-register" view=DriverRegisterPage/>
                        <Route path="/services" view=ServicesPage/>
                        <Route path="/book" view=CustomerBook/>
                        <Route path="/driver-duty" view=DriverDuty/>
                        <Route path="/track-driver" view=CustomerTrackDriver/>
                        <Route path="/profile" view=ProtectedProfile/>
                    </Routes>
                </Layout>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn CustomerBook() -> impl IntoView {
    view! {
        <RequireRole role=Role::Customer>
            {|| view! { <BookPage/> }}
        </RequireRole>
    }
}

#[component]
fn DriverDuty() -> impl IntoView {
    view! {
        <RequireRole role=Role::Driver>
            {|| view! { <DriverDutyPage/> }}
        </RequireRole>
    }
}

#[component]
fn CustomerTrackDriver() -> impl IntoView {
    view! {
        <RequireRole role=Role::Customer>
            {|| view! { <TrackDriverPage/> }}
        </RequireRole>
    }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! {
        <RequireAuth>
            {|| view! { <ProfilePage/> }}
        </RequireAuth>
    }
}
