//! Store: the document collection that holds every [`Entry`].
//!
//! Backends implement [`EntryStore`]. The concrete backend is chosen from the
//! store connection string by [`connect`]:
//!
//! | URI | Backend |
//! |-----|---------|
//! | `memory://` | [`MemoryStore`]: process-local, lost on exit |
//! | `file://<dir>` | [`FileStore`]: JSON-lines file at `<dir>/<database>/<collection>.jsonl` |

use std::future::Future;
use std::path::Path;

use tracing::info;

use crate::{
    config::StoreConfig,
    error::StoreError,
    types::{Entry, NewEntry},
};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Insert and query operations over a single entries collection.
///
/// Each call is atomic from the caller's point of view: an insert is either
/// fully visible to later queries or not at all.
pub trait EntryStore: Send + Sync + 'static {
    /// Persist `entry`, assigning it an id. Returns the stored entry.
    fn insert_one(
        &self,
        entry: NewEntry,
    ) -> impl Future<Output = Result<Entry, StoreError>> + Send;

    /// Every entry, newest `timestamp` first. Ties keep insertion order.
    fn find_newest_first(&self) -> impl Future<Output = Result<Vec<Entry>, StoreError>> + Send;

    /// Flush and release the collection. Later calls fail with
    /// [`StoreError::Closed`].
    fn close(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// The backend selected by [`connect`].
#[derive(Debug)]
pub enum Store {
    Memory(MemoryStore),
    File(FileStore),
}

/// Open the collection described by `config`.
pub async fn connect(config: &StoreConfig) -> Result<Store, StoreError> {
    let uri = config.uri.trim();

    if uri == "memory://" || uri == "memory:" {
        info!(collection = %config.collection, "using in-memory entry store");
        return Ok(Store::Memory(MemoryStore::new()));
    }

    if let Some(root) = uri.strip_prefix("file://") {
        if root.is_empty() {
            return Err(StoreError::UnsupportedUri(uri.to_string()));
        }
        let store = FileStore::open(Path::new(root), &config.database, &config.collection).await?;
        info!(path = %store.path().display(), "using file entry store");
        return Ok(Store::File(store));
    }

    Err(StoreError::UnsupportedUri(uri.to_string()))
}

impl EntryStore for Store {
    async fn insert_one(&self, entry: NewEntry) -> Result<Entry, StoreError> {
        match self {
            Store::Memory(s) => s.insert_one(entry).await,
            Store::File(s) => s.insert_one(entry).await,
        }
    }

    async fn find_newest_first(&self) -> Result<Vec<Entry>, StoreError> {
        match self {
            Store::Memory(s) => s.find_newest_first().await,
            Store::File(s) => s.find_newest_first().await,
        }
    }

    async fn close(&self) -> Result<(), StoreError> {
        match self {
            Store::Memory(s) => s.close().await,
            Store::File(s) => s.close().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn store_config(uri: &str) -> StoreConfig {
        StoreConfig {
            uri: uri.to_string(),
            ..StoreConfig::default()
        }
    }

    #[tokio::test]
    async fn memory_uri_selects_memory_store() {
        let store = connect(&store_config("memory://")).await.unwrap();
        assert!(matches!(store, Store::Memory(_)));
    }

    #[tokio::test]
    async fn file_uri_selects_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("file://{}", dir.path().display());
        let store = connect(&store_config(&uri)).await.unwrap();
        match store {
            Store::File(s) => {
                let expected = dir.path().join("adviceArchive").join("entries.jsonl");
                assert_eq!(s.path(), expected.as_path());
            }
            other => panic!("expected file store, got {other:?}"),
        }
    }

    #[rstest]
    #[case("mongodb://localhost:27017")]
    #[case("file://")]
    #[case("")]
    #[tokio::test]
    async fn unsupported_uris_are_rejected(#[case] uri: &str) {
        let err = connect(&store_config(uri)).await.unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedUri(_)), "{err}");
    }
}
