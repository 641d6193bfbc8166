//! Bot Studio
//!
//! A builder for retrieval-augmented chat bot sites.
//!
//! This library provides:
//! - The bot builder core (form state, logo encoding, submission assembly, preview)
//! - A Dioxus web UI (builder, catalog, settings, bot detail)
//! - The catalog store and HTTP API (server build)
//! - Server-Sent Events for live catalog updates (server build)

pub mod app;
pub mod bot;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod bus;
#[cfg(feature = "server")]
pub mod catalog;
#[cfg(feature = "server")]
pub mod config;
