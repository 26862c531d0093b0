//! Credential storage.
//!
//! Holds the access/refresh token pair issued at login and rotated on every
//! refresh. Writes are a full overwrite of all four fields; readers never
//! observe a partially-written pair.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TokenResponse;

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The full credential set, overwritten wholesale on login and refresh and
/// erased on logout or account deletion.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user_id: i64,
}

impl From<TokenResponse> for CredentialPair {
    fn from(tokens: TokenResponse) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            user_id: tokens.user_id,
        }
    }
}

/// Durable holder for the current [`CredentialPair`].
///
/// Reads may suspend on storage I/O. Implementations serialize writes so a
/// `save` or `clear` is atomic from any reader's point of view.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn access_token(&self) -> StoreResult<Option<String>>;

    async fn refresh_token(&self) -> StoreResult<Option<String>>;

    async fn token_type(&self) -> StoreResult<Option<String>>;

    async fn user_id(&self) -> StoreResult<Option<i64>>;

    /// Replace every stored field with `pair`.
    async fn save(&self, pair: CredentialPair) -> StoreResult<()>;

    /// Remove all stored fields.
    async fn clear(&self) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenResponse;

    #[test]
    fn pair_from_token_response_keeps_all_fields() {
        let tokens = TokenResponse {
            access_token: "A1".into(),
            refresh_token: "R1".into(),
            token_type: "bearer".into(),
            user_id: 7,
        };

        let pair = CredentialPair::from(tokens);
        assert_eq!(pair.access_token, "A1");
        assert_eq!(pair.refresh_token, "R1");
        assert_eq!(pair.token_type, "bearer");
        assert_eq!(pair.user_id, 7);
    }
}
