//! Bot builder core
//!
//! Shared between the browser and the server build:
//! - Form state for the builder page
//! - Logo encoding into inline data URIs
//! - Shared RAG settings (data sources, retriever, model, prompt)
//! - Submission assembly (runtime request + catalog record + id)
//! - Preview projection, including font stylesheet references
//!
//! Nothing here performs I/O; callers supply the sinks.

pub mod assemble;
pub mod form;
pub mod logo;
pub mod preview;
pub mod settings;

pub use assemble::{
    assemble, detail_path, next_id, reconcile_stored_id, submit, Assembly, CatalogRecord,
    Dispatch, GenerationSettings, Navigate, SubmissionRequest,
};
pub use form::{FormState, DEFAULT_COLOR, FONT_CHOICES};
pub use logo::{LogoError, LogoUploads, UploadTicket};
pub use preview::{font_stylesheet_href, LogoArea, PreviewModel};
pub use settings::{DataSourceKind, LlmSelection, RetrieverSelection, SharedSettings};
