//! Local mirror of server state.
//!
//! One cache per entity type, keyed by id. The server response is always
//! authoritative: list fetches replace the whole table, single-entity writes
//! upsert, deletes remove by id. Entries are never merged and never expire
//! on their own.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryCache;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Entity types that can live in the mirror.
pub trait Mirrored: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
}

/// Async per-entity-type key/value table.
#[async_trait]
pub trait EntityCache<T: Mirrored>: Send + Sync {
    async fn insert(&self, item: T) -> CacheResult<()>;

    /// Wholesale replacement: drop every existing row, then store `items`.
    async fn insert_all(&self, items: Vec<T>) -> CacheResult<()>;

    async fn upsert(&self, item: T) -> CacheResult<()>;

    async fn delete_by_id(&self, id: i64) -> CacheResult<()>;

    async fn delete_all(&self) -> CacheResult<()>;

    async fn get_all(&self) -> CacheResult<Vec<T>>;

    async fn get_by_id(&self, id: i64) -> CacheResult<Option<T>>;
}
