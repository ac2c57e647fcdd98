//! Link store backends.

pub mod memory;
pub mod sqlite;

pub use burrow_core::store::{LinkStore, ReadLinkStore, Result};
pub use burrow_core::StorageError;
pub use memory::InMemoryLinkStore;
pub use sqlite::{SqliteLinkStore, SqliteSettings};
