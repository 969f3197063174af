//! In-memory entries collection.

use tokio::sync::RwLock;

use super::EntryStore;
use crate::{
    error::StoreError,
    types::{sort_newest_first, Entry, NewEntry},
};

#[derive(Debug, Default)]
struct MemoryState {
    entries: Vec<Entry>,
    last_id: u64,
    closed: bool,
}

/// A collection that lives for as long as the process does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryStore {
    async fn insert_one(&self, entry: NewEntry) -> Result<Entry, StoreError> {
        let mut state = self.state.write().await;
        if state.closed {
            return Err(StoreError::Closed);
        }
        state.last_id += 1;
        let stored = entry.with_id(state.last_id);
        state.entries.push(stored.clone());
        Ok(stored)
    }

    async fn find_newest_first(&self) -> Result<Vec<Entry>, StoreError> {
        let state = self.state.read().await;
        if state.closed {
            return Err(StoreError::Closed);
        }
        let mut entries = state.entries.clone();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.state.write().await.closed = true;
        Ok(())
    }
}
