//! Dioxus fullstack application entry point.
//!
//! This module provides the main App component that serves as the root
//! of the Dioxus application with client-side hydration.

use dioxus::prelude::*;

pub mod api;
pub mod components;
pub mod pages;
pub mod sse;
pub mod studio_context;

use crate::bot::Navigate;
use pages::{BotDetail, Builder, Catalog, Settings};
use sse::use_sse_provider;
use studio_context::use_studio_provider;

/// Root app component with routing
#[component]
pub fn App() -> Element {
    // Initialize SSE context at app root (single EventSource for all pages)
    use_sse_provider();

    // Initialize studio context at app root (settings + catalog store)
    use_studio_provider();

    rsx! {
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Builder {},
    #[route("/bots")]
    Catalog {},
    #[route("/settings")]
    Settings {},
    #[route("/:id")]
    BotDetail { id: u64 },
}

/// Navigation sink backed by the Dioxus router
pub struct RouterNavigate;

impl Navigate for RouterNavigate {
    fn navigate_to(&mut self, path: &str) {
        match path.parse::<Route>() {
            Ok(route) => {
                navigator().push(route);
            }
            Err(e) => tracing::warn!("Cannot navigate to {}: {}", path, e),
        }
    }
}
