//! advice: Advice Archive
//!
//! Submit short pieces of advice and browse them newest-first. This crate is
//! the HTTP face of [`advice_core`]: it exposes the router and server
//! lifecycle as public modules so that integration tests can drive them
//! directly.
//!
//! # Architecture
//!
//! ```text
//! advice view ──► advice-client ──HTTP──► routes ──► EntryService ──► Store
//!                                            │
//!                                            └──► error (status + body)
//! ```
//!
//! `GET /entries` lists every entry newest first; `POST /entries` creates
//! one. Anything else answers 404.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{router, serve, serve_on};
