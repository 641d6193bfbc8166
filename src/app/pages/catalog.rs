//! Catalog page: every bot created so far.

use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::app::sse::use_sse;
use crate::app::studio_context::use_studio;
use crate::app::Route;
use crate::bot::CatalogRecord;

/// Catalog listing page component.
#[component]
pub fn Catalog() -> Element {
    let studio = use_studio();
    let sse = use_sse();

    // Refresh on SSE events (records added from other tabs)
    use_effect(move || {
        let _ = (sse.event_count)();
        if sse.should_refresh_catalog() {
            spawn(studio.reload_catalog());
        }
    });

    let records = studio.catalog();

    rsx! {
        Layout {
            title: "Bots".to_string(),
            nav_active: "bots".to_string(),

            h1 { "Bots" }

            if !studio.is_loaded() {
                p { aria_busy: "true", "Loading bots..." }
            } else if records.is_empty() {
                article {
                    p { "No bots yet." }
                    Link { to: Route::Builder {}, "Create the first one" }
                }
            } else {
                table { class: "catalog",
                    thead {
                        tr {
                            th { "#" }
                            th { "Title" }
                            th { "Font" }
                            th { "Color" }
                            th { "Sources" }
                        }
                    }
                    tbody {
                        for record in records {
                            CatalogRow { key: "{record.id}", record: record.clone() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CatalogRow(record: CatalogRecord) -> Element {
    let title = if record.title.is_empty() {
        "(untitled)".to_string()
    } else {
        record.title.clone()
    };
    let font = record.font.clone().unwrap_or_else(|| "inherit".to_string());
    let swatch = format!("background-color:{};", record.color);

    rsx! {
        tr {
            td { "{record.id}" }
            td {
                Link { to: Route::BotDetail { id: record.id }, "{title}" }
            }
            td { "{font}" }
            td {
                span { class: "swatch", style: "{swatch}" }
                " {record.color}"
            }
            td { "{record.services.len()}" }
        }
    }
}
