//! Submission: turning the builder's form and the shared settings into the
//! records handed to the store.
//!
//! Assembly is pure. [`submit`] adds the side-effect ordering: the runtime
//! request is dispatched first, then the catalog record, then the caller is
//! navigated to the new record. None of these steps wait for the store.

use serde::{Deserialize, Serialize};

use super::form::FormState;
use super::settings::{LlmSelection, RetrieverSelection, SharedSettings};

/// Sampling temperature applied to every submitted bot
pub const FORCED_TEMPERATURE: u32 = 0;

/// Generation parameters sent with a submission.
///
/// The temperature is integral so it reaches the wire as `0`, never `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub temperature: u32,
}

impl GenerationSettings {
    /// The only generation settings the builder produces
    pub fn pinned() -> Self {
        Self {
            temperature: FORCED_TEMPERATURE,
        }
    }
}

/// Record forwarded to the bot runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub services: Vec<String>,
    pub settings: GenerationSettings,
    pub retriever: Option<RetrieverSelection>,
    pub llm: Option<LlmSelection>,
    pub prompt: String,
}

/// Catalog entry persisted for listing and the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    pub color: String,
    pub services: Vec<String>,
    pub settings: GenerationSettings,
    pub retriever: Option<RetrieverSelection>,
    pub llm: Option<LlmSelection>,
    pub prompt: String,
    pub id: u64,
    #[serde(default)]
    pub popup: bool,
}

/// Everything one submit produces
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub id: u64,
    pub request: SubmissionRequest,
    pub record: CatalogRecord,
}

/// Id for the record appended to a catalog of `catalog_len` entries
pub fn next_id(catalog_len: usize) -> u64 {
    catalog_len as u64 + 1
}

/// Router path of a catalog record's detail view
pub fn detail_path(id: u64) -> String {
    format!("/{}", id)
}

/// Build both records from a form snapshot, the shared settings, and the
/// current catalog length. Settings are copied through unmodified.
pub fn assemble(form: &FormState, settings: &SharedSettings, catalog_len: usize) -> Assembly {
    let id = next_id(catalog_len);

    let request = SubmissionRequest {
        services: settings.services.clone(),
        settings: GenerationSettings::pinned(),
        retriever: settings.retriever.clone(),
        llm: settings.llm.clone(),
        prompt: settings.prompt.clone(),
    };

    let record = CatalogRecord {
        title: form.title.clone(),
        description: form.description.clone(),
        logo: form.logo.clone(),
        font: form.font.clone(),
        color: form.color.clone(),
        services: request.services.clone(),
        settings: request.settings.clone(),
        retriever: request.retriever.clone(),
        llm: request.llm.clone(),
        prompt: request.prompt.clone(),
        id,
        popup: false,
    };

    Assembly {
        id,
        request,
        record,
    }
}

/// Store-side sink for submitted records. Calls are fire-and-forget.
pub trait Dispatch {
    fn submit_configuration(&mut self, request: SubmissionRequest);
    fn append_catalog_record(&mut self, record: CatalogRecord);
}

/// Router-side sink for the post-submit navigation
pub trait Navigate {
    fn navigate_to(&mut self, path: &str);
}

/// Assemble and hand off one submission, returning the new record's id
pub fn submit<D, N>(
    form: &FormState,
    settings: &SharedSettings,
    catalog_len: usize,
    dispatch: &mut D,
    navigate: &mut N,
) -> u64
where
    D: Dispatch + ?Sized,
    N: Navigate + ?Sized,
{
    let Assembly {
        id,
        request,
        record,
    } = assemble(form, settings, catalog_len);

    tracing::info!("Submitting bot {} ({:?})", id, record.title);

    dispatch.submit_configuration(request);
    dispatch.append_catalog_record(record);
    navigate.navigate_to(&detail_path(id));

    id
}

/// Move an optimistically appended record to the id the store assigned.
///
/// Only the entry that is still exactly `proposed` is rewritten, so a
/// different record that happens to share the proposed id (for example one
/// loaded from the store after another editor appended) is left alone. If
/// the list already holds `stored_id`, a reload has caught up and nothing
/// changes. Returns whether a record was rewritten.
pub fn reconcile_stored_id(
    records: &mut [CatalogRecord],
    proposed: &CatalogRecord,
    stored_id: u64,
) -> bool {
    if proposed.id == stored_id || records.iter().any(|r| r.id == stored_id) {
        return false;
    }

    match records.iter_mut().find(|r| *r == proposed) {
        Some(record) => {
            record.id = stored_id;
            true
        }
        None => false,
    }
}
