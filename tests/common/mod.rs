//! Shared test utilities for advice integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Stores are in-process, and servers bind 127.0.0.1 on a
//! random port, so harnesses can run in parallel.

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod test_server;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use test_server::*;
