//! URL shortener service implementation.
//!
//! This crate ties a [`LinkStore`](burrow_core::LinkStore) to a code
//! [`Generator`](burrow_generator::Generator): idempotent shortening,
//! bounded retry on code collisions and batch partial-failure handling.
//! Core types are re-exported from `burrow_core`.

pub mod service;

pub use burrow_core::{Link, ShortCode, Shortener, ShortenerError};
pub use service::{ShortenerService, ShortenerSettings, DEFAULT_MAX_ATTEMPTS};
