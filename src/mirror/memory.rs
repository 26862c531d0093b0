use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use super::{CacheResult, EntityCache, Mirrored};

/// Row wrapper recording when the entity was last confirmed by the server.
#[derive(Clone, Debug)]
struct CachedRow<T> {
    item: T,
    fetched_at: DateTime<Utc>,
}

/// In-memory [`EntityCache`] backend.
///
/// `insert_all` replaces through `clear` plus re-insert under a fresh
/// timestamp; a reader between the two steps can observe the empty table.
pub struct MemoryCache<T: Mirrored> {
    rows: Arc<DashMap<i64, CachedRow<T>>>,
}

impl<T: Mirrored> MemoryCache<T> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(DashMap::new()),
        }
    }

    /// When the entity was last written, if present.
    pub fn fetched_at(&self, id: i64) -> Option<DateTime<Utc>> {
        self.rows.get(&id).map(|row| row.fetched_at)
    }
}

impl<T: Mirrored> Default for MemoryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Mirrored> Clone for MemoryCache<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }
}

#[async_trait]
impl<T: Mirrored> EntityCache<T> for MemoryCache<T> {
    async fn insert(&self, item: T) -> CacheResult<()> {
        self.rows.insert(
            item.id(),
            CachedRow {
                item,
                fetched_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn insert_all(&self, items: Vec<T>) -> CacheResult<()> {
        let fetched_at = Utc::now();
        self.rows.clear();
        for item in items {
            self.rows.insert(item.id(), CachedRow { item, fetched_at });
        }
        Ok(())
    }

    async fn upsert(&self, item: T) -> CacheResult<()> {
        self.insert(item).await
    }

    async fn delete_by_id(&self, id: i64) -> CacheResult<()> {
        self.rows.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> CacheResult<()> {
        self.rows.clear();
        Ok(())
    }

    async fn get_all(&self) -> CacheResult<Vec<T>> {
        let mut items: Vec<T> = self
            .rows
            .iter()
            .map(|entry| entry.value().item.clone())
            .collect();
        items.sort_by_key(|item| item.id());
        Ok(items)
    }

    async fn get_by_id(&self, id: i64) -> CacheResult<Option<T>> {
        Ok(self.rows.get(&id).map(|row| row.item.clone()))
    }
}
