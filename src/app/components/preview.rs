//! Live preview of a bot's chat widget.

use dioxus::prelude::*;

use crate::bot::PreviewModel;

/// Renders a bot card exactly as users will see it.
///
/// The mock chat controls are inert; they only show placement.
#[component]
pub fn BotPreview(model: PreviewModel) -> Element {
    let logo_style = model.logo.style();
    let title_style = model.title_style();
    let description_style = model.description_style();

    rsx! {
        if let Some(href) = model.stylesheet.clone() {
            document::Link { rel: "stylesheet", href: "{href}" }
        }

        article { class: "bot-preview",
            div { class: "bot-preview-logo", style: "{logo_style}" }
            h2 { class: "bot-preview-title", style: "{title_style}", "{model.title}" }
            p { class: "bot-preview-description", style: "{description_style}", "{model.description}" }

            div { class: "bot-preview-chat",
                input {
                    r#type: "text",
                    disabled: true,
                    placeholder: "Ask a question...",
                }
                textarea {
                    disabled: true,
                    rows: "4",
                    placeholder: "The answer will appear here",
                }
            }
        }
    }
}
