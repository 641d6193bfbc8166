//! Builder page: edit a bot's presentation and submit it to the catalog.

use dioxus::prelude::*;

use crate::app::components::{BotPreview, ColorInput, FontSelect, Layout, TextAreaInput, TextInput};
use crate::app::studio_context::use_studio;
use crate::app::RouterNavigate;
use crate::bot::logo::encode_logo;
use crate::bot::{self, FormState, LogoError, LogoUploads, PreviewModel};

/// Builder page component.
#[component]
pub fn Builder() -> Element {
    let studio = use_studio();

    // Discarded with the page
    let mut form = use_signal(FormState::default);
    let mut uploads = use_signal(LogoUploads::default);

    let preview = use_memo(move || PreviewModel::from_form(&form.read()));

    // Encoding stays in the browser; nothing is uploaded
    let on_logo_picked = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };

        let ticket = uploads.write().begin();
        let name = file.name();
        let declared = file.content_type();

        let result = file
            .read_bytes()
            .await
            .map(|bytes| encode_logo(&name, declared.as_deref(), &bytes))
            .map_err(|e| LogoError::Read(e.to_string()));

        let guard = *uploads.read();
        if guard.resolve(ticket, result, &mut form.write()) {
            tracing::debug!("Logo updated from {}", name);
        }
    };

    let on_clear_logo = move |_| {
        // Pending reads must not bring the old logo back
        uploads.write().begin();
        form.write().clear_logo();
    };

    let on_submit = move |_| {
        let snapshot = form.read().clone();
        let settings = studio.settings();
        let mut sink = studio;
        bot::submit(
            &snapshot,
            &settings,
            studio.catalog_len(),
            &mut sink,
            &mut RouterNavigate,
        );
    };

    let current = form.read().clone();
    let has_logo = current.logo.is_some();

    rsx! {
        Layout {
            title: "New Bot".to_string(),
            nav_active: "builder".to_string(),

            h1 { "New Bot" }

            div { class: "builder",
                section { class: "builder-form",
                    TextInput {
                        label: "Title",
                        value: current.title.clone(),
                        placeholder: "My bot",
                        on_input: move |v: String| form.write().set_title(v),
                    }
                    TextAreaInput {
                        label: "Description",
                        value: current.description.clone(),
                        on_input: move |v: String| form.write().set_description(v),
                    }

                    div { class: "field",
                        span { class: "field-label", "Logo" }
                        div { class: "logo-row",
                            input {
                                r#type: "file",
                                accept: "image/*",
                                multiple: false,
                                onchange: on_logo_picked,
                            }
                            if has_logo {
                                button {
                                    class: "btn btn-ghost btn-sm",
                                    r#type: "button",
                                    onclick: on_clear_logo,
                                    "Remove"
                                }
                            }
                        }
                    }

                    FontSelect {
                        value: current.font.clone(),
                        on_change: move |v: String| form.write().set_font(&v),
                    }
                    ColorInput {
                        value: current.color.clone(),
                        on_change: move |v: String| form.write().set_color(v),
                    }

                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: on_submit,
                        "Create bot"
                    }
                }

                section { class: "builder-preview",
                    h2 { "Preview" }
                    BotPreview { model: preview() }
                }
            }
        }
    }
}
