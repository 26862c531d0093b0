use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CredentialPair, CredentialStore, StoreResult};

/// In-memory credential store for tests and ephemeral sessions.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    pair: Arc<RwLock<Option<CredentialPair>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, mostly useful in tests.
    pub fn with_pair(pair: CredentialPair) -> Self {
        Self {
            pair: Arc::new(RwLock::new(Some(pair))),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn access_token(&self) -> StoreResult<Option<String>> {
        Ok(self.pair.read().await.as_ref().map(|p| p.access_token.clone()))
    }

    async fn refresh_token(&self) -> StoreResult<Option<String>> {
        Ok(self.pair.read().await.as_ref().map(|p| p.refresh_token.clone()))
    }

    async fn token_type(&self) -> StoreResult<Option<String>> {
        Ok(self.pair.read().await.as_ref().map(|p| p.token_type.clone()))
    }

    async fn user_id(&self) -> StoreResult<Option<i64>> {
        Ok(self.pair.read().await.as_ref().map(|p| p.user_id))
    }

    async fn save(&self, pair: CredentialPair) -> StoreResult<()> {
        *self.pair.write().await = Some(pair);
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.pair.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(n: u32) -> CredentialPair {
        CredentialPair {
            access_token: format!("A{n}"),
            refresh_token: format!("R{n}"),
            token_type: "bearer".into(),
            user_id: n as i64,
        }
    }

    #[tokio::test]
    async fn empty_store_yields_none_for_every_field() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
        assert_eq!(store.token_type().await.unwrap(), None);
        assert_eq!(store.user_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_overwrites_every_field() {
        let store = MemoryCredentialStore::new();
        store.save(pair(1)).await.unwrap();
        store.save(pair(2)).await.unwrap();

        assert_eq!(store.access_token().await.unwrap(), Some("A2".into()));
        assert_eq!(store.refresh_token().await.unwrap(), Some("R2".into()));
        assert_eq!(store.user_id().await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn clear_removes_all_fields() {
        let store = MemoryCredentialStore::with_pair(pair(1));
        store.clear().await.unwrap();

        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_readers_never_see_interleaved_pairs() {
        let store = MemoryCredentialStore::with_pair(pair(1));

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for n in 2..50 {
                    store.save(pair(n)).await.unwrap();
                }
            })
        };

        // Each observed (access, refresh) combination must come from the
        // same generation.
        for _ in 0..200 {
            let guard = store.pair.read().await;
            if let Some(p) = guard.as_ref() {
                let generation = p.access_token.trim_start_matches('A').to_string();
                assert_eq!(p.refresh_token, format!("R{generation}"));
            }
        }

        writer.await.unwrap();
    }
}
