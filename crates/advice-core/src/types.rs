//! Core types for advice-core.
//!
//! [`Entry`] is the only persisted entity. [`NewEntry`] is the validated,
//! timestamped value the service hands to a store, which assigns the id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted piece of advice, as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned identifier. Opaque to clients.
    pub id: u64,
    /// Advice text, trimmed and never empty.
    pub text: String,
    /// Server-side creation time (UTC), serialized as RFC 3339.
    pub timestamp: DateTime<Utc>,
}

/// An entry that passed validation but has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl NewEntry {
    /// Attach the id chosen by the store.
    pub fn with_id(self, id: u64) -> Entry {
        Entry {
            id,
            text: self.text,
            timestamp: self.timestamp,
        }
    }
}

/// Sort entries newest first. The sort is stable, so entries sharing a
/// timestamp keep the order they were inserted in.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
