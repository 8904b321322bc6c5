//! Shared helpers for pipeline tests.

pub mod harness;
pub mod ingest;
