//! Entry service: validates input and turns store results into outcomes.
//!
//! The store is injected at construction; the service holds no other state,
//! so every call is an independent request/response exchange.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    error::{Operation, ServiceError, StoreError},
    store::EntryStore,
    types::{Entry, NewEntry},
};

pub struct EntryService<S> {
    store: S,
}

impl<S: EntryStore> EntryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All entries, newest first.
    pub async fn list(&self) -> Result<Vec<Entry>, ServiceError> {
        self.store.find_newest_first().await.map_err(|source| {
            error!(error = %source, "failed to fetch entries");
            ServiceError::Store {
                op: Operation::List,
                source,
            }
        })
    }

    /// Validate `text`, stamp it with the current time and persist it.
    ///
    /// `text` is the raw JSON value of the request's `text` field, `None`
    /// when the field was absent. The store is not touched unless validation
    /// passes.
    pub async fn create(&self, text: Option<&Value>) -> Result<Entry, ServiceError> {
        let text = validate_text(text)?;
        let entry = NewEntry {
            text,
            timestamp: Utc::now(),
        };

        let stored = self.store.insert_one(entry).await.map_err(|source| {
            error!(error = %source, "failed to save entry");
            ServiceError::Store {
                op: Operation::Create,
                source,
            }
        })?;

        info!(id = stored.id, "entry created");
        Ok(stored)
    }

    /// Close the underlying store.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.store.close().await
    }
}

/// Accept only a JSON string that is non-empty after trimming. Returns the
/// trimmed text.
pub fn validate_text(value: Option<&Value>) -> Result<String, ServiceError> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        other => {
            debug!(text = ?other, "rejected entry text");
            Err(ServiceError::Validation)
        }
    }
}
