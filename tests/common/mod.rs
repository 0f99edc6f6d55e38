//! Shared test utilities for esfeed integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. The fakes run in-process: [`FlakyStore`] wraps the
//! in-memory store with failure injection, and
//! [`fake_elastic_api::FakeElasticApi`] serves the three REST endpoints the
//! HTTP client uses.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use flaky_store::FlakyStore;
