//! advice-core: Advice Archive core library.
//!
//! This crate exposes the layers behind the two `/entries` routes as public
//! modules, plus the shared types used by the server, the HTTP client and the
//! terminal view.
//!
//! # Architecture
//!
//! ```text
//! HTTP route ──► EntryService ──► EntryStore (memory | file)
//!                     │
//!                     └──► ServiceError ──► status + {"error": ...}
//! ```
//!
//! The store handle is created once by [`store::connect`], handed to
//! [`service::EntryService::new`], and closed explicitly on shutdown.

pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::{Operation, ServiceError, StoreError};
pub use service::EntryService;
pub use store::{EntryStore, Store};
pub use types::{Entry, NewEntry};
