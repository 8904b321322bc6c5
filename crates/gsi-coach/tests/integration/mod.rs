//! Integration tests for gsi-coach.
//!
//! These tests run the whole pipeline over real sockets:
//! - Ingestion over HTTP
//! - Consumer and rule evaluation on the in-memory queue
//! - Fan-out to WebSocket viewers

pub mod common;
