//! Navigation component for the web UI.

use dioxus::prelude::*;

use crate::app::Route;

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "builder", "bots")
    pub active: String,
}

/// Navigation bar with router links.
#[component]
pub fn Nav(props: NavProps) -> Element {
    let links = [
        ("builder", "New Bot", Route::Builder {}),
        ("bots", "Bots", Route::Catalog {}),
        ("settings", "Settings", Route::Settings {}),
    ];

    rsx! {
        nav { class: "nav",
            ul {
                li {
                    strong { "Bot Studio" }
                }
            }
            ul {
                for (id, label, route) in links {
                    li { key: "{id}",
                        if props.active == id {
                            Link { to: route.clone(), class: "active", strong { "{label}" } }
                        } else {
                            Link { to: route.clone(), "{label}" }
                        }
                    }
                }
            }
        }
    }
}
