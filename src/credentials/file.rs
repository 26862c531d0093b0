use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CredentialPair, CredentialStore, StoreResult};

/// JSON-file-backed credential store that survives process restarts.
///
/// The current pair is kept in memory and every mutation rewrites the whole
/// file through a temp-file-then-rename, so a crash mid-write leaves either
/// the previous or the new pair on disk, never a torn one. The write lock
/// doubles as the single-writer queue.
pub struct FileCredentialStore {
    path: PathBuf,
    pair: Arc<RwLock<Option<CredentialPair>>>,
}

impl FileCredentialStore {
    /// Open the store, hydrating from `path` if the file exists.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let pair = match tokio::fs::read(&path).await {
            Ok(bytes) => Some(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            pair: Arc::new(RwLock::new(pair)),
        })
    }

    async fn persist(&self, pair: Option<&CredentialPair>) -> StoreResult<()> {
        match pair {
            Some(pair) => {
                let tmp = self.path.with_extension("tmp");
                let bytes = serde_json::to_vec_pretty(pair)?;
                tokio::fs::write(&tmp, bytes).await?;
                tokio::fs::rename(&tmp, &self.path).await?;
            }
            None => match tokio::fs::remove_file(&self.path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
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
        let mut guard = self.pair.write().await;
        self.persist(Some(&pair)).await?;
        *guard = Some(pair);
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        let mut guard = self.pair.write().await;
        self.persist(None).await?;
        *guard = None;
        Ok(())
    }
}
