//! Layout component wrapping all pages.

use dioxus::prelude::*;

use super::nav::Nav;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Active navigation item ID
    pub nav_active: String,
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("BOT_STUDIO_VERSION");
    let full_title = format!("{} - Bot Studio", props.title);

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{full_title}" }
        document::Link {
            rel: "stylesheet",
            href: asset!("/public/studio.css")
        }

        Nav { active: props.nav_active.clone() }
        main { class: "container",
            {props.children}
        }
        footer { class: "container footer",
            small { class: "text-muted", "Bot Studio v{version}" }
        }
    }
}
