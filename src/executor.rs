//! Generic authenticated-request executor.
//!
//! Every authenticated operation in the crate goes through
//! [`RequestExecutor::execute_with_retry`]: one attempt with the current
//! access token, at most one credential refresh on a 401, at most one retry.
//! The retry ceiling is what keeps a permanently invalid refresh token from
//! looping.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::credentials::{CredentialPair, CredentialStore};
use crate::error::ApiError;
use crate::transport::{RemoteResponse, TransportResult};

/// Exchanges the stored refresh token for a new credential pair and
/// persists it. Failing terminally when no refresh token exists is part of
/// the contract.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self) -> Result<CredentialPair, ApiError>;
}

pub struct RequestExecutor {
    store: Arc<dyn CredentialStore>,
    refresher: Arc<dyn TokenRefresher>,
}

impl RequestExecutor {
    pub fn new(store: Arc<dyn CredentialStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self { store, refresher }
    }

    /// Run `operation` with the current access token, refreshing and
    /// retrying exactly once on a 401.
    ///
    /// `on_success` runs only for a 2xx response, on whichever attempt
    /// produced it; the local mirror is mutated nowhere else. Any non-401
    /// failure status returns immediately with the body's `detail` message.
    /// A failed refresh is terminal: the original operation is not retried.
    pub async fn execute_with_retry<F, Fut, S, SFut, T>(
        &self,
        op_name: &str,
        operation: F,
        on_success: S,
    ) -> Result<T, ApiError>
    where
        F: Fn(String) -> Fut + Send,
        Fut: Future<Output = TransportResult<RemoteResponse>> + Send,
        S: FnOnce(RemoteResponse) -> SFut + Send,
        SFut: Future<Output = Result<T, ApiError>> + Send,
    {
        let token = self.store.access_token().await?.unwrap_or_default();
        debug!(operation = op_name, "issuing request");
        let first = operation(token).await.map_err(ApiError::from)?;

        if first.is_success() {
            return on_success(first).await;
        }
        if !first.is_unauthorized() {
            return Err(ApiError::Rejected(first.error_detail()));
        }

        warn!(operation = op_name, "access token rejected, refreshing credentials");
        self.refresher.refresh().await?;

        let token = self.store.access_token().await?.unwrap_or_default();
        debug!(operation = op_name, "retrying after refresh");
        let second = operation(token).await.map_err(ApiError::from)?;

        if second.is_success() {
            return on_success(second).await;
        }
        if second.is_unauthorized() {
            warn!(operation = op_name, "still unauthorized after refresh");
            return Err(ApiError::Unauthorized(second.error_detail()));
        }
        Err(ApiError::Rejected(second.error_detail()))
    }
}
