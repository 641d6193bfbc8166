//! Bot detail page: a stored catalog record rendered like the builder preview.

use dioxus::prelude::*;

use crate::app::components::{BotPreview, Layout};
use crate::app::studio_context::use_studio;
use crate::app::Route;
use crate::bot::{
    CatalogRecord, DataSourceKind, LlmSelection, PreviewModel, RetrieverSelection,
};

/// Bot detail page component.
#[component]
pub fn BotDetail(id: u64) -> Element {
    let studio = use_studio();

    // The record just submitted is already in the local catalog; other ids
    // (deep links, reloads) come from the server.
    let remote = use_resource(use_reactive!(|id| async move {
        if studio.record(id).is_some() {
            return None;
        }
        match crate::app::api::fetch_record(id).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Bot {} not available: {}", id, e);
                None
            }
        }
    }));

    let record = studio.record(id).or_else(|| remote.read().clone().flatten());
    let pending = record.is_none() && remote.read().is_none();

    rsx! {
        Layout {
            title: format!("Bot #{}", id),
            nav_active: "bots".to_string(),

            match record {
                Some(record) => rsx! { RecordView { record } },
                None if pending => rsx! { p { aria_busy: "true", "Loading bot #{id}..." } },
                None => rsx! {
                    article {
                        h1 { "Bot not found" }
                        p { "There is no bot with id {id}." }
                        Link { to: Route::Catalog {}, "Back to all bots" }
                    }
                },
            }
        }
    }
}

#[component]
fn RecordView(record: CatalogRecord) -> Element {
    let model = PreviewModel::from_record(&record);
    let temperature = record.settings.temperature;

    rsx! {
        h1 { "Bot #{record.id}" }

        div { class: "builder",
            section { class: "builder-preview",
                BotPreview { model }
            }

            section { class: "bot-settings",
                h2 { "Data sources" }
                if record.services.is_empty() {
                    p { class: "text-muted", "None" }
                } else {
                    ul {
                        for (i, source) in record.services.iter().enumerate() {
                            li { key: "{i}",
                                SourceBadge { location: source.clone() }
                                " {source}"
                            }
                        }
                    }
                }

                h2 { "Retriever" }
                RetrieverSummary { retriever: record.retriever.clone() }

                h2 { "Language model" }
                LlmSummary { llm: record.llm.clone() }
                p { class: "text-muted", "Temperature: {temperature}" }

                h2 { "Prompt" }
                if record.prompt.is_empty() {
                    p { class: "text-muted", "None" }
                } else {
                    pre { class: "prompt", "{record.prompt}" }
                }
            }
        }
    }
}

/// Badge naming the loader a data source would use
#[component]
pub fn SourceBadge(location: String) -> Element {
    match DataSourceKind::classify(&location) {
        Some(kind) => rsx! { span { class: "badge", "{kind.label()}" } },
        None => rsx! { span { class: "badge badge-warning", "unsupported" } },
    }
}

#[component]
fn RetrieverSummary(retriever: Option<RetrieverSelection>) -> Element {
    let Some(r) = retriever else {
        return rsx! { p { class: "text-muted", "Not selected" } };
    };

    rsx! {
        dl {
            dt { "Embeddings" }
            dd { "{r.embeddings_model}" }
            dt { "Chunk size / overlap" }
            dd { "{r.chunk_size} / {r.chunk_overlap}" }
            dt { "Results per query" }
            dd { "{r.k}" }
        }
    }
}

#[component]
fn LlmSummary(llm: Option<LlmSelection>) -> Element {
    match llm {
        None => rsx! { p { class: "text-muted", "Not selected" } },
        Some(LlmSelection::GigaChat { verify_ssl_certs }) => rsx! {
            p {
                "GigaChat"
                if !verify_ssl_certs {
                    small { class: "text-muted", " (certificate checks off)" }
                }
            }
        },
        Some(other) => rsx! { p { "{other.display_name()}" } },
    }
}
