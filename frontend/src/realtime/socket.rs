use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use super::events::{ClientEvent, ServerEvent};
use crate::config;

const RECONNECT_DELAY_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RealtimeError {
    #[error("failed to open realtime channel to {url}: {reason}")]
    Connect { url: String, reason: String },
    #[error("failed to encode realtime event: {0}")]
    Encode(String),
    #[error("failed to send realtime event: {0}")]
    Send(String),
}

type Listener = Rc<dyn Fn(&ServerEvent)>;

#[derive(Default)]
struct Inner {
    socket: Option<WebSocket>,
    url: Option<String>,
    listeners: HashMap<usize, Listener>,
    next_listener_id: usize,
    pending: Vec<String>,
    shutting_down: bool,
}

/// Shared realtime channel to the dispatch server.
///
/// One instance is created by the app shell and handed to pages through
/// context, so the booking, duty and tracking pages all talk over the same
/// socket. Events emitted before the socket opens are buffered and flushed
/// on open; events emitted after an unclean close are buffered until the
/// scheduled reconnect succeeds.
#[derive(Clone)]
pub struct RealtimeClient {
    inner: Rc<RefCell<Inner>>,
    pub connected: RwSignal<bool>,
    pub last_error: RwSignal<Option<String>>,
}

/// Detaches its listener from the channel when dropped. Pages hold one per
/// `subscribe` call for as long as they want the events.
pub struct Subscription {
    id: usize,
    inner: Weak<RefCell<Inner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().listeners.remove(&self.id);
        }
    }
}

impl RealtimeClient {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::default())),
            connected: create_rw_signal(false),
            last_error: create_rw_signal(None),
        }
    }

    /// Opens the socket against the configured realtime URL. Safe to call
    /// when a socket already exists; the existing connection is kept.
    pub async fn connect(&self) -> Result<(), RealtimeError> {
        if self.inner.borrow().socket.is_some() {
            return Ok(());
        }
        let url = match self.inner.borrow().url.clone() {
            Some(url) => url,
            None => config::await_realtime_url().await,
        };
        self.open(url)
    }

    fn open(&self, url: String) -> Result<(), RealtimeError> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.socket.is_some() {
                return Ok(());
            }
            inner.url = Some(url.clone());
            inner.shutting_down = false;
        }

        let socket = WebSocket::new(&url).map_err(|err| RealtimeError::Connect {
            url: url.clone(),
            reason: format_js_error(&err),
        })?;

        let inner = Rc::clone(&self.inner);
        let connected = self.connected;
        let last_error = self.last_error;
        let flush_socket = socket.clone();
        let on_open = Closure::wrap(Box::new(move || {
            connected.set(true);
            last_error.set(None);
            log::info!("realtime channel connected");
            let buffered: Vec<String> = inner.borrow_mut().pending.drain(..).collect();
            for frame in buffered {
                if let Err(err) = flush_socket.send_with_str(&frame) {
                    log::warn!("realtime: dropped buffered frame: {}", format_js_error(&err));
                }
            }
        }) as Box<dyn FnMut()>);
        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        let inner = Rc::clone(&self.inner);
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                log::warn!("realtime: ignoring non-text frame");
                return;
            };
            match ServerEvent::from_wire(&text) {
                Ok(server_event) => {
                    let listeners: Vec<Listener> =
                        inner.borrow().listeners.values().cloned().collect();
                    for listener in listeners {
                        listener(&server_event);
                    }
                }
                Err(err) => log::warn!("realtime: undecodable frame: {err}"),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        let last_error = self.last_error;
        let on_error = Closure::wrap(Box::new(move |_: Event| {
            log::error!("realtime channel error");
            last_error.set(Some("Failed to connect to server".to_string()));
        }) as Box<dyn FnMut(Event)>);
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();

        let client = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            client.connected.set(false);
            let shutting_down = {
                let mut inner = client.inner.borrow_mut();
                inner.socket = None;
                inner.shutting_down
            };
            if shutting_down || event.was_clean() {
                log::info!("realtime channel closed (code {})", event.code());
                return;
            }
            log::warn!(
                "realtime channel dropped (code {}), retrying in {}ms",
                event.code(),
                RECONNECT_DELAY_MS
            );
            let client = client.clone();
            spawn_local(async move {
                TimeoutFuture::new(RECONNECT_DELAY_MS).await;
                if let Err(err) = client.connect().await {
                    log::error!("realtime reconnect failed: {err}");
                }
            });
        }) as Box<dyn FnMut(CloseEvent)>);
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        self.inner.borrow_mut().socket = Some(socket);
        log::info!("realtime: connecting to {url}");
        Ok(())
    }

    /// Serializes and sends an event, or buffers it while the socket is not
    /// yet open.
    pub fn emit(&self, event: &ClientEvent) -> Result<(), RealtimeError> {
        let frame = event
            .to_wire()
            .map_err(|err| RealtimeError::Encode(err.to_string()))?;
        let mut inner = self.inner.borrow_mut();
        match &inner.socket {
            Some(socket) if socket.ready_state() == WebSocket::OPEN => {
                socket
                    .send_with_str(&frame)
                    .map_err(|err| RealtimeError::Send(format_js_error(&err)))?;
                log::debug!("realtime: sent {}", event.name());
                Ok(())
            }
            _ => {
                log::debug!("realtime: buffering {} until the channel opens", event.name());
                inner.pending.push(frame);
                Ok(())
            }
        }
    }

    /// Registers a listener for every decoded server event. The listener
    /// stays attached until the returned `Subscription` is dropped.
    pub fn subscribe(&self, listener: impl Fn(&ServerEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.insert(id, Rc::new(listener));
        Subscription {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn disconnect(&self) {
        let socket = {
            let mut inner = self.inner.borrow_mut();
            inner.shutting_down = true;
            inner.pending.clear();
            inner.socket.take()
        };
        if let Some(socket) = socket {
            socket.set_onopen(None);
            socket.set_onmessage(None);
            socket.set_onerror(None);
            if let Err(err) = socket.close() {
                log::warn!("realtime: close failed: {}", format_js_error(&err));
            }
        }
        self.connected.set(false);
    }
}

impl Default for RealtimeClient {
    fn default() -> Self {
        Self::new()
    }
}

fn format_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
