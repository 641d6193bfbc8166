//! Settings page component.
//!
//! Edits the shared settings every new bot is built with: data sources,
//! retriever, language model and prompt.

use dioxus::prelude::*;

use super::bot_detail::SourceBadge;
use crate::app::components::{ErrorAlert, Layout, TextAreaInput, TextInput};
use crate::app::sse::use_sse;
use crate::app::studio_context::use_studio;
use crate::bot::settings::{parse_services, DEFAULT_EMBEDDINGS_MODEL};
use crate::bot::{LlmSelection, RetrieverSelection, SharedSettings};

const PROVIDER_NONE: &str = "";
const PROVIDER_HUGGING_FACE: &str = "hugging_face";
const PROVIDER_GIGA_CHAT: &str = "giga_chat";

/// Editable text form of [`SharedSettings`]
#[derive(Debug, Clone, PartialEq)]
struct SettingsDraft {
    services: String,
    retriever_enabled: bool,
    embeddings_model: String,
    chunk_size: String,
    chunk_overlap: String,
    k: String,
    provider: String,
    model_name: String,
    verify_ssl_certs: bool,
    prompt: String,
}

impl From<&SharedSettings> for SettingsDraft {
    fn from(settings: &SharedSettings) -> Self {
        let retriever = settings.retriever.clone().unwrap_or_default();
        let (provider, model_name, verify_ssl_certs) = match &settings.llm {
            None => (PROVIDER_NONE, String::new(), false),
            Some(LlmSelection::HuggingFace { model_name }) => {
                (PROVIDER_HUGGING_FACE, model_name.clone(), false)
            }
            Some(LlmSelection::GigaChat { verify_ssl_certs }) => {
                (PROVIDER_GIGA_CHAT, String::new(), *verify_ssl_certs)
            }
        };

        Self {
            services: settings.services.join("\n"),
            retriever_enabled: settings.retriever.is_some(),
            embeddings_model: retriever.embeddings_model,
            chunk_size: retriever.chunk_size.to_string(),
            chunk_overlap: retriever.chunk_overlap.to_string(),
            k: retriever.k.to_string(),
            provider: provider.to_string(),
            model_name,
            verify_ssl_certs,
            prompt: settings.prompt.clone(),
        }
    }
}

impl SettingsDraft {
    fn to_settings(&self) -> Result<SharedSettings, String> {
        let retriever = if self.retriever_enabled {
            let embeddings_model = match self.embeddings_model.trim() {
                "" => DEFAULT_EMBEDDINGS_MODEL.to_string(),
                model => model.to_string(),
            };
            Some(RetrieverSelection {
                embeddings_model,
                chunk_size: parse_count("Chunk size", &self.chunk_size)?,
                chunk_overlap: parse_count("Chunk overlap", &self.chunk_overlap)?,
                k: parse_count("Results per query", &self.k)?,
            })
        } else {
            None
        };

        let llm = match self.provider.as_str() {
            PROVIDER_HUGGING_FACE => Some(LlmSelection::HuggingFace {
                model_name: self.model_name.trim().to_string(),
            }),
            PROVIDER_GIGA_CHAT => Some(LlmSelection::GigaChat {
                verify_ssl_certs: self.verify_ssl_certs,
            }),
            _ => None,
        };

        Ok(SharedSettings {
            services: parse_services(&self.services),
            retriever,
            llm,
            prompt: self.prompt.clone(),
        })
    }
}

fn parse_count(field: &str, value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a whole number, got {:?}", field, value))
}

/// Settings page component.
#[component]
pub fn Settings() -> Element {
    let studio = use_studio();
    let sse = use_sse();

    let mut draft = use_signal(|| SettingsDraft::from(&SharedSettings::default()));
    let mut error = use_signal(|| None::<String>);
    let mut saved = use_signal(|| false);

    // Sync draft when the stored settings load or change
    use_effect(move || {
        if studio.is_loaded() {
            draft.set(SettingsDraft::from(&studio.settings()));
        }
    });

    // Refresh on SSE events (settings saved elsewhere)
    use_effect(move || {
        let _ = (sse.event_count)();
        if sse.should_refresh_settings() {
            spawn(studio.reload());
        }
    });

    let save = move |_| match draft.read().to_settings() {
        Ok(settings) => {
            error.set(None);
            studio.save_settings(settings);
            saved.set(true);
        }
        Err(e) => {
            saved.set(false);
            error.set(Some(e));
        }
    };

    let current = draft.read().clone();
    let sources = parse_services(&current.services);

    rsx! {
        Layout {
            title: "Settings".to_string(),
            nav_active: "settings".to_string(),

            h1 { "Settings" }
            p { class: "text-muted", "Every new bot is created with these settings." }

            if let Some(msg) = error() {
                ErrorAlert { message: msg, on_dismiss: move |_| error.set(None) }
            }

            section {
                h2 { "Data sources" }
                TextAreaInput {
                    label: "Sources",
                    description: "One per line: .txt or .pdf paths, or web page URLs",
                    value: current.services.clone(),
                    rows: 5,
                    on_input: move |v: String| {
                        saved.set(false);
                        draft.write().services = v;
                    },
                }
                if !sources.is_empty() {
                    ul { class: "sources",
                        for (i, source) in sources.into_iter().enumerate() {
                            li { key: "{i}",
                                SourceBadge { location: source.clone() }
                                " {source}"
                            }
                        }
                    }
                }
            }

            section {
                h2 { "Retriever" }
                label {
                    input {
                        r#type: "checkbox",
                        checked: current.retriever_enabled,
                        onchange: move |_| {
                            saved.set(false);
                            let mut d = draft.write();
                            d.retriever_enabled = !d.retriever_enabled;
                        }
                    }
                    " Use a vector-store retriever"
                }
                if current.retriever_enabled {
                    TextInput {
                        label: "Embeddings model",
                        value: current.embeddings_model.clone(),
                        placeholder: DEFAULT_EMBEDDINGS_MODEL,
                        on_input: move |v: String| draft.write().embeddings_model = v,
                    }
                    div { class: "grid",
                        TextInput {
                            label: "Chunk size",
                            value: current.chunk_size.clone(),
                            on_input: move |v: String| draft.write().chunk_size = v,
                        }
                        TextInput {
                            label: "Chunk overlap",
                            value: current.chunk_overlap.clone(),
                            on_input: move |v: String| draft.write().chunk_overlap = v,
                        }
                        TextInput {
                            label: "Results per query",
                            value: current.k.clone(),
                            on_input: move |v: String| draft.write().k = v,
                        }
                    }
                }
            }

            section {
                h2 { "Language model" }
                label { class: "field",
                    span { class: "field-label", "Provider" }
                    select {
                        onchange: move |e| {
                            saved.set(false);
                            draft.write().provider = e.value();
                        },
                        option { value: PROVIDER_NONE, selected: current.provider.is_empty(), "None" }
                        option {
                            value: PROVIDER_HUGGING_FACE,
                            selected: current.provider == PROVIDER_HUGGING_FACE,
                            "Hugging Face"
                        }
                        option {
                            value: PROVIDER_GIGA_CHAT,
                            selected: current.provider == PROVIDER_GIGA_CHAT,
                            "GigaChat"
                        }
                    }
                }
                if current.provider == PROVIDER_HUGGING_FACE {
                    TextInput {
                        label: "Model name",
                        value: current.model_name.clone(),
                        placeholder: "google/gemma-2-9b-it",
                        on_input: move |v: String| draft.write().model_name = v,
                    }
                }
                if current.provider == PROVIDER_GIGA_CHAT {
                    label {
                        input {
                            r#type: "checkbox",
                            checked: current.verify_ssl_certs,
                            onchange: move |_| {
                                let mut d = draft.write();
                                d.verify_ssl_certs = !d.verify_ssl_certs;
                            }
                        }
                        " Verify TLS certificates"
                    }
                    p { class: "text-muted",
                        "Credentials are configured on the bot runtime, not here."
                    }
                }
            }

            section {
                h2 { "Prompt" }
                TextAreaInput {
                    label: "System prompt",
                    value: current.prompt.clone(),
                    rows: 6,
                    on_input: move |v: String| {
                        saved.set(false);
                        draft.write().prompt = v;
                    },
                }
            }

            div { class: "actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: save,
                    "Save"
                }
                if saved() {
                    small { class: "text-muted", " Saved" }
                }
            }
        }
    }
}
