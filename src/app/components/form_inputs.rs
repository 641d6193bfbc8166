//! Reusable form input components.

use dioxus::prelude::*;

use crate::bot::FONT_CHOICES;

/// A labeled single-line text input.
#[component]
pub fn TextInput(
    /// Input label
    label: &'static str,
    /// Current value
    value: String,
    #[props(default = "")] placeholder: &'static str,
    /// Called on every keystroke
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            input {
                r#type: "text",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}

/// A labeled multi-line text input.
#[component]
pub fn TextAreaInput(
    /// Input label
    label: &'static str,
    /// Description text shown below label
    #[props(default = "")]
    description: &'static str,
    /// Current value
    value: String,
    #[props(default = 4)] rows: u32,
    /// Called on every keystroke
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            if !description.is_empty() {
                small { class: "text-muted", "{description}" }
            }
            textarea {
                rows: "{rows}",
                value: "{value}",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}

/// Accent color picker with a free-form text field.
///
/// The picker only speaks hex; the text field also accepts named colors.
#[component]
pub fn ColorInput(
    /// Current color expression
    value: String,
    /// Called with the new color string
    on_change: EventHandler<String>,
) -> Element {
    // <input type=color> rejects anything but #rrggbb
    let picker_value = if value.len() == 7 && value.starts_with('#') {
        value.clone()
    } else {
        "#000000".to_string()
    };

    rsx! {
        div { class: "field",
            span { class: "field-label", "Accent color" }
            div { class: "color-row",
                input {
                    r#type: "color",
                    value: "{picker_value}",
                    oninput: move |e| on_change.call(e.value()),
                }
                input {
                    r#type: "text",
                    value: "{value}",
                    oninput: move |e| on_change.call(e.value()),
                }
            }
        }
    }
}

/// Font family picker over the closed list of supported fonts.
#[component]
pub fn FontSelect(
    /// Selected family, `None` for the inherited font
    value: Option<String>,
    /// Called with the selected family ("" for inherit)
    on_change: EventHandler<String>,
) -> Element {
    let selected = value.unwrap_or_default();

    rsx! {
        label { class: "field",
            span { class: "field-label", "Font" }
            select {
                onchange: move |e| on_change.call(e.value()),
                option { value: "", selected: selected.is_empty(), "Default (inherit)" }
                for font in FONT_CHOICES.iter() {
                    option {
                        key: "{font}",
                        value: "{font}",
                        selected: selected == *font,
                        "{font}"
                    }
                }
            }
        }
    }
}
