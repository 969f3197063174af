//! Error taxonomy for the entries service.
//!
//! [`StoreError`] describes what went wrong inside a storage backend.
//! [`ServiceError`] is what the service layer reports to callers; the HTTP
//! layer maps each variant to exactly one status code and body.

use std::path::PathBuf;

use thiserror::Error;

/// Message returned for every rejected create request.
pub const VALIDATION_MESSAGE: &str = "Advice text is required and must be a string.";

/// Failures raised by an [`EntryStore`](crate::store::EntryStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode entry: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("corrupt document at {path}:{line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("unsupported store uri: {0}")]
    UnsupportedUri(String),

    #[error("store is closed")]
    Closed,
}

/// Which service operation a store failure interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::List => write!(f, "list"),
            Operation::Create => write!(f, "create"),
        }
    }
}

/// Outcome kinds of the entries service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The caller sent a missing, non-string or blank `text`.
    #[error("Advice text is required and must be a string.")]
    Validation,

    /// The store failed while serving `op`.
    #[error("store failure during {op}: {source}")]
    Store {
        op: Operation,
        #[source]
        source: StoreError,
    },

    /// No route matched the request.
    #[error("Not found")]
    NotFound,

    /// The route exists but not for this HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ServiceError {
    /// The message safe to show a caller. Store diagnostics are never
    /// included.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServiceError::Validation => VALIDATION_MESSAGE,
            ServiceError::Store { op: Operation::List, .. } => "Could not fetch entries",
            ServiceError::Store { op: Operation::Create, .. } => "Could not save entry",
            ServiceError::NotFound => "Not found",
            ServiceError::MethodNotAllowed => "Method not allowed",
        }
    }
}
