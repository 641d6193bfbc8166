//! App-level SSE (Server-Sent Events) context.
//!
//! Provides a single EventSource connection shared across all components,
//! so catalog views follow records added from other tabs or operators.

use dioxus::prelude::*;
use serde::Deserialize;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Payload for catalog additions
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CatalogPayload {
    pub id: u64,
    pub title: String,
}

/// SSE event types from the server
/// Server sends: {"type":"EventName","payload":{...}}
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum SseEvent {
    ConfigurationSubmitted,
    CatalogRecordAdded {
        payload: CatalogPayload,
    },
    SettingsUpdated,

    // Catch-all for unknown events
    #[serde(other)]
    Unknown,
}

/// Global SSE state shared via context
#[derive(Clone, Copy)]
pub struct SseContext {
    /// Last received event (triggers re-renders)
    pub last_event: Signal<Option<SseEvent>>,
    /// Connection status
    pub connected: Signal<bool>,
    /// Event counter (increments on each event, useful for triggering refreshes)
    pub event_count: Signal<u64>,
}

impl SseContext {
    pub fn should_refresh_catalog(&self) -> bool {
        matches!(
            self.last_event.read().as_ref(),
            Some(SseEvent::CatalogRecordAdded { .. })
        )
    }

    pub fn should_refresh_settings(&self) -> bool {
        matches!(self.last_event.read().as_ref(), Some(SseEvent::SettingsUpdated))
    }
}

/// RAII guard to close EventSource on drop
#[cfg(target_arch = "wasm32")]
struct EventSourceGuard {
    es: web_sys::EventSource,
    // Closures are dropped with the guard
    _onopen: Closure<dyn FnMut(web_sys::Event)>,
    _onmessage: Closure<dyn FnMut(web_sys::MessageEvent)>,
    _onerror: Closure<dyn FnMut(web_sys::Event)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for EventSourceGuard {
    fn drop(&mut self) {
        tracing::debug!("SSE: Closing EventSource connection");
        self.es.close();
    }
}

/// Initialize SSE context provider - call once at app root
pub fn use_sse_provider() {
    let last_event = use_signal(|| None::<SseEvent>);
    let connected = use_signal(|| false);
    let event_count = use_signal(|| 0u64);

    let ctx = SseContext {
        last_event,
        connected,
        event_count,
    };

    use_context_provider(|| ctx);

    // Client-side only: establish actual EventSource connection
    #[cfg(target_arch = "wasm32")]
    {
        let guard: Rc<RefCell<Option<EventSourceGuard>>> =
            use_hook(|| Rc::new(RefCell::new(None)));

        use_effect(move || {
            use web_sys::EventSource;

            if guard.borrow().is_some() {
                return;
            }

            let es = match EventSource::new("/events") {
                Ok(es) => es,
                Err(e) => {
                    tracing::error!("Failed to create EventSource: {:?}", e);
                    return;
                }
            };

            let mut connected_open = connected;
            let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
                tracing::debug!("SSE: Connection opened");
                connected_open.set(true);
            }) as Box<dyn FnMut(_)>);
            es.set_onopen(Some(onopen.as_ref().unchecked_ref()));

            let mut last_event_msg = last_event;
            let mut event_count_msg = event_count;
            let onmessage = Closure::wrap(Box::new(move |e: web_sys::MessageEvent| {
                let Some(data) = e.data().as_string() else {
                    return;
                };
                match serde_json::from_str::<SseEvent>(&data) {
                    Ok(event) => {
                        tracing::debug!("SSE: {:?}", event);
                        last_event_msg.set(Some(event));
                        event_count_msg.set(event_count_msg() + 1);
                    }
                    Err(e) => tracing::warn!("SSE: Parse error: {}", e),
                }
            }) as Box<dyn FnMut(_)>);
            es.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

            let mut connected_err = connected;
            let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
                tracing::warn!("SSE: Connection error");
                connected_err.set(false);
            }) as Box<dyn FnMut(_)>);
            es.set_onerror(Some(onerror.as_ref().unchecked_ref()));

            *guard.borrow_mut() = Some(EventSourceGuard {
                es,
                _onopen: onopen,
                _onmessage: onmessage,
                _onerror: onerror,
            });
        });
    }
}

/// Get SSE context - use in any component that needs SSE events
pub fn use_sse() -> SseContext {
    use_context::<SseContext>()
}
