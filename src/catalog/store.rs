//! Catalog store - the authoritative home of published bots
//!
//! Holds:
//! - Catalog records (insertion order, persisted to catalog.json)
//! - Shared RAG settings (persisted to settings.json)
//! - Recent runtime submissions (memory only)
//!
//! The store is the single writer of record ids. Clients propose
//! `length + 1`; the store keeps that id when it is free and otherwise
//! assigns the next id after the current maximum.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::bot::{CatalogRecord, SharedSettings, SubmissionRequest};

const CATALOG_FILE: &str = "catalog.json";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize {file}: {source}")]
    Serialize {
        file: &'static str,
        source: serde_json::Error,
    },
}

struct CatalogState {
    records: Vec<CatalogRecord>,
    settings: SharedSettings,
    submissions: VecDeque<SubmissionRequest>,
}

/// Catalog store
#[derive(Clone)]
pub struct CatalogStore {
    state: Arc<RwLock<CatalogState>>,
    data_dir: PathBuf,
    submission_history: usize,
}

impl CatalogStore {
    /// Create new store, loading existing records and settings from disk
    pub fn new(data_dir: PathBuf, submission_history: usize) -> Self {
        let records: Vec<CatalogRecord> = load_json(&data_dir, CATALOG_FILE).unwrap_or_default();
        let settings: SharedSettings = load_json(&data_dir, SETTINGS_FILE).unwrap_or_default();

        tracing::info!(
            "Catalog loaded from {}: {} record(s)",
            data_dir.display(),
            records.len()
        );

        Self {
            state: Arc::new(RwLock::new(CatalogState {
                records,
                settings,
                submissions: VecDeque::new(),
            })),
            data_dir,
            submission_history: submission_history.max(1),
        }
    }

    /// Number of records in the catalog
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// All records in insertion order
    pub async fn list(&self) -> Vec<CatalogRecord> {
        self.state.read().await.records.clone()
    }

    /// Get record by id
    pub async fn get(&self, id: u64) -> Option<CatalogRecord> {
        let state = self.state.read().await;
        state.records.iter().find(|r| r.id == id).cloned()
    }

    /// Append a record, reconciling its id, and return what was stored
    pub async fn append(&self, mut record: CatalogRecord) -> Result<CatalogRecord, StoreError> {
        let stored = {
            let mut state = self.state.write().await;

            let taken = state.records.iter().any(|r| r.id == record.id);
            if record.id == 0 || taken {
                let next = state.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
                tracing::warn!(
                    "Catalog id {} unavailable, assigning {} to {:?}",
                    record.id,
                    next,
                    record.title
                );
                record.id = next;
            }

            state.records.push(record.clone());
            // Written under the lock so snapshots land on disk in order
            let json = to_json(CATALOG_FILE, &state.records)?;
            write_file(&self.data_dir, CATALOG_FILE, &json)?;
            record
        };

        tracing::info!("Appended catalog record {} ({:?})", stored.id, stored.title);
        Ok(stored)
    }

    /// Current shared settings
    pub async fn settings(&self) -> SharedSettings {
        self.state.read().await.settings.clone()
    }

    /// Replace the shared settings
    pub async fn update_settings(&self, settings: SharedSettings) -> Result<(), StoreError> {
        {
            let mut state = self.state.write().await;
            state.settings = settings;
            let json = to_json(SETTINGS_FILE, &state.settings)?;
            write_file(&self.data_dir, SETTINGS_FILE, &json)?;
        }

        tracing::info!("Updated shared settings");
        Ok(())
    }

    /// Accept a runtime submission, keeping only the most recent ones
    pub async fn record_submission(&self, request: SubmissionRequest) {
        let mut state = self.state.write().await;
        state.submissions.push_back(request);
        while state.submissions.len() > self.submission_history {
            state.submissions.pop_front();
        }
    }

    /// Most recently accepted submission
    pub async fn latest_submission(&self) -> Option<SubmissionRequest> {
        self.state.read().await.submissions.back().cloned()
    }
}

fn load_json<T: DeserializeOwned>(data_dir: &Path, file: &str) -> Option<T> {
    let path = data_dir.join(file);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring unreadable {}: {}", path.display(), e);
            None
        }
    }
}

fn to_json<T: Serialize>(file: &'static str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize { file, source })
}

fn write_file(data_dir: &Path, file: &str, json: &str) -> Result<(), StoreError> {
    let path = data_dir.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::{assemble, FormState, LlmSelection};

    fn record(title: &str, id: u64) -> CatalogRecord {
        let form = FormState {
            title: title.to_string(),
            ..Default::default()
        };
        let mut record = assemble(&form, &SharedSettings::default(), 0).record;
        record.id = id;
        record
    }

    #[tokio::test]
    async fn test_append_keeps_free_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().to_path_buf(), 8);

        let stored = store.append(record("first", 1)).await.unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(1).await.unwrap().title, "first");
    }

    #[tokio::test]
    async fn test_append_reassigns_duplicate_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().to_path_buf(), 8);

        store.append(record("a", 1)).await.unwrap();
        let stored = store.append(record("b", 1)).await.unwrap();

        assert_eq!(stored.id, 2);
        let ids: Vec<u64> = store.list().await.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_append_reassigns_zero_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().to_path_buf(), 8);

        store.append(record("a", 4)).await.unwrap();
        let stored = store.append(record("b", 0)).await.unwrap();
        assert_eq!(stored.id, 5);
    }

    #[tokio::test]
    async fn test_concurrent_appends_never_share_an_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().to_path_buf(), 8);

        // Both clients read length 0 and propose id 1
        let (a, b) = tokio::join!(store.append(record("a", 1)), store.append(record("b", 1)));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_records_and_settings_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = CatalogStore::new(dir.path().to_path_buf(), 8);
            store.append(record("kept", 1)).await.unwrap();
            store
                .update_settings(SharedSettings {
                    services: vec!["notes.txt".to_string()],
                    llm: Some(LlmSelection::GigaChat {
                        verify_ssl_certs: false,
                    }),
                    prompt: "Be brief".to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let reloaded = CatalogStore::new(dir.path().to_path_buf(), 8);
        assert_eq!(reloaded.get(1).await.unwrap().title, "kept");
        let settings = reloaded.settings().await;
        assert_eq!(settings.services, vec!["notes.txt".to_string()]);
        assert_eq!(settings.prompt, "Be brief");
    }

    #[tokio::test]
    async fn test_corrupt_catalog_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CATALOG_FILE), "not json").unwrap();

        let store = CatalogStore::new(dir.path().to_path_buf(), 8);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_submission_history_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().to_path_buf(), 2);

        for prompt in ["one", "two", "three"] {
            let settings = SharedSettings {
                prompt: prompt.to_string(),
                ..Default::default()
            };
            let request = assemble(&FormState::default(), &settings, 0).request;
            store.record_submission(request).await;
        }

        assert_eq!(store.latest_submission().await.unwrap().prompt, "three");
        assert_eq!(store.state.read().await.submissions.len(), 2);
    }
}
