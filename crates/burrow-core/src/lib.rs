//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the link model, the short code type, the error
//! taxonomy and the store/shortener contracts shared by the storage
//! backends, the shortener service and the HTTP gateway.

pub mod error;
pub mod link;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use error::{CoreError, ShortenerError, StorageError};
pub use link::Link;
pub use shortcode::{ShortCode, RESERVED_CODES};
pub use shortener::Shortener;
pub use store::{LinkStore, ReadLinkStore};
