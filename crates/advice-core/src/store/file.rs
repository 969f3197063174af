//! JSON-lines entries collection on local disk.
//!
//! One document per line, appended on insert. The whole file is re-read on
//! every query; this collection never grows large enough for that to matter.
//!
//! A write that fails halfway is rolled back by truncating to the previous
//! length. A file that still ends in an unterminated line (for example after
//! a crash) has that tail discarded when it is opened.

use std::path::{Path, PathBuf};

use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    sync::Mutex,
};
use tracing::warn;

use super::EntryStore;
use crate::{
    error::StoreError,
    types::{sort_newest_first, Entry, NewEntry},
};

#[derive(Debug)]
struct FileState {
    file: File,
    /// Length of the file up to the last complete document.
    len: u64,
    last_id: u64,
}

/// Entries collection stored at `<root>/<database>/<collection>.jsonl`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// `None` once closed. Held across reads too, so a query never sees a
    /// half-written line.
    state: Mutex<Option<FileState>>,
}

impl FileStore {
    /// Open (creating if needed) the collection file under `root`.
    pub async fn open(root: &Path, database: &str, collection: &str) -> Result<Self, StoreError> {
        let dir = root.join(database);
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(format!("{collection}.jsonl"));

        let raw = read_raw(&path).await?;
        let parsed = parse_documents(&path, &raw)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        if parsed.valid_len < raw.len() {
            warn!(
                path = %path.display(),
                dropped_bytes = raw.len() - parsed.valid_len,
                "discarding unterminated trailing document"
            );
            file.set_len(parsed.valid_len as u64).await?;
        }

        let last_id = parsed.entries.iter().map(|e| e.id).max().unwrap_or(0);

        Ok(Self {
            path,
            state: Mutex::new(Some(FileState {
                file,
                len: parsed.valid_len as u64,
                last_id,
            })),
        })
    }

    /// Location of the collection file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStore for FileStore {
    async fn insert_one(&self, entry: NewEntry) -> Result<Entry, StoreError> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(StoreError::Closed)?;

        let stored = entry.with_id(state.last_id + 1);
        let mut line = serde_json::to_vec(&stored)?;
        line.push(b'\n');

        let written = async {
            state.file.write_all(&line).await?;
            state.file.sync_data().await
        }
        .await;

        if let Err(e) = written {
            if let Err(rollback) = state.file.set_len(state.len).await {
                warn!(path = %self.path.display(), error = %rollback, "rollback after failed insert failed");
            }
            return Err(e.into());
        }

        state.len += line.len() as u64;
        state.last_id = stored.id;
        Ok(stored)
    }

    async fn find_newest_first(&self) -> Result<Vec<Entry>, StoreError> {
        let guard = self.state.lock().await;
        if guard.is_none() {
            return Err(StoreError::Closed);
        }

        let raw = read_raw(&self.path).await?;
        let mut entries = parse_documents(&self.path, &raw)?.entries;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    async fn close(&self) -> Result<(), StoreError> {
        if let Some(state) = self.state.lock().await.take() {
            state.file.sync_all().await?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Document parsing
// ---------------------------------------------------------------------------

struct Parsed {
    entries: Vec<Entry>,
    /// Byte length of `raw` up to and including the last newline.
    valid_len: usize,
}

async fn read_raw(path: &Path) -> Result<Vec<u8>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(raw) => Ok(raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Parse every newline-terminated document in `raw`. Bytes after the last
/// newline are ignored, so a tail cut inside a multi-byte character never
/// reaches the decoder.
fn parse_documents(path: &Path, raw: &[u8]) -> Result<Parsed, StoreError> {
    let valid_len = raw
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);

    let entries = raw[..valid_len]
        .split(|&b| b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
        .map(|(i, line)| {
            serde_json::from_slice(line).map_err(|source| StoreError::Corrupt {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect::<Result<Vec<Entry>, _>>()?;

    Ok(Parsed { entries, valid_len })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
