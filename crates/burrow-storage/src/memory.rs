use async_trait::async_trait;
use burrow_core::store::{LinkStore, ReadLinkStore, Result};
use burrow_core::{Link, ShortCode, StorageError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Both indexes of the store plus insertion order.
#[derive(Debug, Default)]
struct Tables {
    url_by_code: HashMap<String, String>,
    code_by_url: HashMap<String, String>,
    order: Vec<String>,
}

impl Tables {
    fn link(&self, code: &str) -> Option<Link> {
        self.url_by_code
            .get(code)
            .map(|url| Link::new(ShortCode::new_unchecked(code), url.clone()))
    }
}

/// In-memory implementation of [`LinkStore`].
///
/// Both uniqueness checks and the insert run under one write lock, so
/// concurrent saves of the same code or URL never both succeed. Clones
/// share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLinkStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryLinkStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                url_by_code: HashMap::with_capacity(capacity),
                code_by_url: HashMap::with_capacity(capacity),
                order: Vec::with_capacity(capacity),
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.tables.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadLinkStore for InMemoryLinkStore {
    async fn get_by_short_code(&self, code: &ShortCode) -> Result<Option<Link>> {
        Ok(self.tables.read().link(code.as_str()))
    }

    async fn get_by_original_url(&self, url: &str) -> Result<Option<Link>> {
        let tables = self.tables.read();
        Ok(tables.code_by_url.get(url).and_then(|code| tables.link(code)))
    }

    async fn get_all(&self) -> Result<Vec<Link>> {
        let tables = self.tables.read();
        Ok(tables
            .order
            .iter()
            .filter_map(|code| tables.link(code))
            .collect())
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn save(&self, link: &Link) -> Result<()> {
        let code = link.short_code.as_str();
        let mut tables = self.tables.write();

        if tables.url_by_code.contains_key(code) {
            return Err(StorageError::DuplicateKey(code.to_owned()));
        }
        if tables.code_by_url.contains_key(&link.original_url) {
            return Err(StorageError::DuplicateUrl(link.original_url.clone()));
        }

        tables
            .url_by_code
            .insert(code.to_owned(), link.original_url.clone());
        tables
            .code_by_url
            .insert(link.original_url.clone(), code.to_owned());
        tables.order.push(code.to_owned());
        Ok(())
    }

    async fn clear_all(&self) -> Result<u64> {
        let mut tables = self.tables.write();
        let removed = tables.order.len() as u64;
        tables.url_by_code.clear();
        tables.code_by_url.clear();
        tables.order.clear();
        Ok(removed)
    }
}
