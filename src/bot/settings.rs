//! Settings chosen outside the builder page: data sources, retriever,
//! language model and prompt.
//!
//! The builder treats these as opaque and copies them into its output
//! records untouched. The concrete shape mirrors what a retrieval-augmented
//! chat bot needs at runtime.

use serde::{Deserialize, Serialize};
use url::Url;

/// Default sentence-embedding model for the retriever
pub const DEFAULT_EMBEDDINGS_MODEL: &str =
    "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

/// Settings owned by the store and consumed read-only by the builder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedSettings {
    /// Data-source locations (text files, PDFs, web pages)
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub retriever: Option<RetrieverSelection>,
    #[serde(default)]
    pub llm: Option<LlmSelection>,
    #[serde(default)]
    pub prompt: String,
}

/// Vector-store retriever parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieverSelection {
    pub embeddings_model: String,
    /// Characters per document chunk
    pub chunk_size: u32,
    /// Characters shared by neighbouring chunks
    pub chunk_overlap: u32,
    /// Number of chunks returned per query
    pub k: u32,
}

impl Default for RetrieverSelection {
    fn default() -> Self {
        Self {
            embeddings_model: DEFAULT_EMBEDDINGS_MODEL.to_string(),
            chunk_size: 2000,
            chunk_overlap: 200,
            k: 5,
        }
    }
}

/// Language model backing the bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum LlmSelection {
    /// Local model pulled from the Hugging Face hub
    HuggingFace { model_name: String },
    /// Hosted GigaChat; credentials are supplied to the runtime separately
    GigaChat {
        #[serde(default)]
        verify_ssl_certs: bool,
    },
}

impl LlmSelection {
    pub fn provider_label(&self) -> &'static str {
        match self {
            LlmSelection::HuggingFace { .. } => "Hugging Face",
            LlmSelection::GigaChat { .. } => "GigaChat",
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            LlmSelection::HuggingFace { model_name } if !model_name.is_empty() => {
                format!("{} ({})", model_name, self.provider_label())
            }
            _ => self.provider_label().to_string(),
        }
    }
}

/// Loader the runtime would pick for a data source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    Text,
    Pdf,
    Web,
}

impl DataSourceKind {
    /// Classify a data-source location. `None` means no loader handles it.
    ///
    /// Advisory only: unsupported sources are still passed through.
    pub fn classify(location: &str) -> Option<Self> {
        let location = location.trim();
        let lower = location.to_lowercase();
        if lower.ends_with(".txt") {
            return Some(DataSourceKind::Text);
        }
        if lower.ends_with(".pdf") {
            return Some(DataSourceKind::Pdf);
        }
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
                Some(DataSourceKind::Web)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataSourceKind::Text => "text",
            DataSourceKind::Pdf => "pdf",
            DataSourceKind::Web => "web",
        }
    }
}

/// Split a textarea of data sources into one entry per non-blank line
pub fn parse_services(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
