//! Bot catalog
//!
//! This module provides:
//! - Catalog store (records, shared settings, recent submissions)
//! - HTTP endpoints used by the builder UI

pub mod routes;
pub mod store;

pub use routes::*;
pub use store::{CatalogStore, StoreError};
