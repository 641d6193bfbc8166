//! Studio context: the client-side application store.
//!
//! Holds the shared settings and the catalog for every page, and acts as
//! the dispatch sink for builder submissions. Dispatches update the local
//! signals immediately and forward to the server without waiting.

use dioxus::prelude::*;

use crate::app::api;
use crate::bot::{
    reconcile_stored_id, CatalogRecord, Dispatch, SharedSettings, SubmissionRequest,
};

/// Global studio state shared via context
#[derive(Clone, Copy)]
pub struct StudioContext {
    settings: Signal<SharedSettings>,
    catalog: Signal<Vec<CatalogRecord>>,
    /// Whether settings and catalog have been loaded from server
    loaded: Signal<bool>,
}

impl StudioContext {
    pub fn is_loaded(&self) -> bool {
        (self.loaded)()
    }

    pub fn settings(&self) -> SharedSettings {
        (self.settings)()
    }

    pub fn catalog(&self) -> Vec<CatalogRecord> {
        (self.catalog)()
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.read().len()
    }

    pub fn record(&self, id: u64) -> Option<CatalogRecord> {
        self.catalog.read().iter().find(|r| r.id == id).cloned()
    }

    /// Replace settings locally and persist them on the server
    pub fn save_settings(&self, new_settings: SharedSettings) {
        let mut settings = self.settings;
        settings.set(new_settings.clone());
        spawn(async move {
            if let Err(e) = api::save_settings(&new_settings).await {
                tracing::warn!("Failed to save settings: {}", e);
            }
        });
    }

    /// Refetch the catalog from the server
    pub async fn reload_catalog(self) {
        match api::fetch_catalog().await {
            Ok(records) => {
                let mut catalog = self.catalog;
                catalog.set(records);
            }
            Err(e) => tracing::warn!("Failed to load catalog: {}", e),
        }
    }

    /// Refetch settings and catalog, then mark the context loaded
    pub async fn reload(self) {
        match api::fetch_settings().await {
            Ok(fetched) => {
                let mut settings = self.settings;
                settings.set(fetched);
            }
            Err(e) => tracing::warn!("Failed to load settings: {}", e),
        }
        self.reload_catalog().await;

        let mut loaded = self.loaded;
        loaded.set(true);
    }

    /// Swap a locally-proposed id for the one the server stored
    fn reconcile_id(&self, proposed: &CatalogRecord, stored: u64) {
        if proposed.id == stored {
            return;
        }
        let mut catalog = self.catalog;
        let mut records = catalog.write();
        if reconcile_stored_id(&mut records, proposed, stored) {
            tracing::warn!("Catalog record {} was stored as {}", proposed.id, stored);
        } else {
            tracing::debug!(
                "Catalog record {} stored as {}, local list already current",
                proposed.id,
                stored
            );
        }
    }
}

impl Dispatch for StudioContext {
    fn submit_configuration(&mut self, request: SubmissionRequest) {
        spawn(async move {
            if let Err(e) = api::submit_request(&request).await {
                tracing::warn!("Failed to submit configuration: {}", e);
            }
        });
    }

    fn append_catalog_record(&mut self, record: CatalogRecord) {
        self.catalog.write().push(record.clone());

        let ctx = *self;
        spawn(async move {
            match api::append_record(&record).await {
                Ok(stored) => ctx.reconcile_id(&record, stored.id),
                Err(e) => tracing::warn!("Failed to append catalog record {}: {}", record.id, e),
            }
        });
    }
}

/// Initialize studio context provider - call once at app root
pub fn use_studio_provider() {
    let settings = use_signal(SharedSettings::default);
    let catalog = use_signal(Vec::<CatalogRecord>::new);
    let loaded = use_signal(|| false);

    let ctx = StudioContext {
        settings,
        catalog,
        loaded,
    };

    use_context_provider(|| ctx);

    // Fetch initial state from server
    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            spawn(ctx.reload());
        });
    }
}

/// Get studio context - use in any component
pub fn use_studio() -> StudioContext {
    use_context::<StudioContext>()
}
