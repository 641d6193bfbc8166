//! Dismissable error alert component.

use dioxus::prelude::*;

/// A dismissable error alert that displays an error message with a close button.
#[component]
pub fn ErrorAlert(
    /// The error message to display
    message: String,
    /// Called when the dismiss button is clicked
    on_dismiss: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "alert alert-error", role: "alert",
            "{message}"
            button {
                class: "btn btn-ghost btn-sm",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
