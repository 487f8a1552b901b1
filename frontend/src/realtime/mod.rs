use leptos::*;

mod events;
mod socket;

pub use events::{ClientEvent, DriverDetails, ServerEvent};
pub use socket::{RealtimeClient, RealtimeError, Subscription};

/// Creates the app-wide realtime channel and places it in context.
/// Called once from the app shell; pages reach it through [`use_realtime`].
pub fn provide_realtime() -> RealtimeClient {
    let client = RealtimeClient::new();
    provide_context(client.clone());
    client
}

pub fn use_realtime() -> RealtimeClient {
    match use_context::<RealtimeClient>() {
        Some(client) => client,
        None => provide_realtime(),
    }
}
