//! Authentication: login, registration, account management, and the
//! refresh coordinator behind the executor's retry path.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::credentials::{CredentialPair, CredentialStore};
use crate::error::ApiError;
use crate::executor::{RequestExecutor, TokenRefresher};
use crate::models::{
    ApiMessage, RefreshRequest, TokenResponse, UserLogin, UserProfile, UserRegister, UserUpdate,
    VerifyRequest,
};
use crate::transport::{ApiRequest, RemoteCaller, TransportError};

/// Exchanges the stored refresh token for a fresh credential pair.
///
/// The store is only mutated on a successful exchange, and the overwrite
/// covers all four fields at once.
pub struct RefreshCoordinator {
    caller: Arc<dyn RemoteCaller>,
    store: Arc<dyn CredentialStore>,
}

impl RefreshCoordinator {
    pub fn new(caller: Arc<dyn RemoteCaller>, store: Arc<dyn CredentialStore>) -> Self {
        Self { caller, store }
    }
}

#[async_trait]
impl TokenRefresher for RefreshCoordinator {
    async fn refresh(&self) -> Result<CredentialPair, ApiError> {
        let refresh_token = self
            .store
            .refresh_token()
            .await?
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::RefreshUnavailable)?;

        let body = serde_json::to_value(RefreshRequest { refresh_token })
            .map_err(TransportError::from)?;
        let response = self
            .caller
            .execute(ApiRequest::post("auth/refresh").json(body))
            .await
            .map_err(ApiError::from)?;

        if !response.is_success() {
            return Err(ApiError::RefreshRejected(response.error_detail()));
        }

        let tokens: TokenResponse = response.json().map_err(ApiError::from)?;
        let pair = CredentialPair::from(tokens);
        self.store.save(pair.clone()).await?;
        debug!("credentials rotated");

        Ok(pair)
    }
}

/// Last-known profile of the signed-in user, mirrored from auth responses.
#[derive(Clone, Default)]
pub struct ProfileStore {
    profile: Arc<RwLock<Option<UserProfile>>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn save(&self, profile: UserProfile) {
        *self.profile.write().await = Some(profile);
    }

    pub async fn get(&self) -> Option<UserProfile> {
        self.profile.read().await.clone()
    }

    pub async fn clear(&self) {
        *self.profile.write().await = None;
    }
}

pub struct AuthService {
    caller: Arc<dyn RemoteCaller>,
    store: Arc<dyn CredentialStore>,
    executor: Arc<RequestExecutor>,
    coordinator: Arc<RefreshCoordinator>,
    profile: ProfileStore,
}

impl AuthService {
    pub fn new(
        caller: Arc<dyn RemoteCaller>,
        store: Arc<dyn CredentialStore>,
        executor: Arc<RequestExecutor>,
        coordinator: Arc<RefreshCoordinator>,
        profile: ProfileStore,
    ) -> Self {
        Self {
            caller,
            store,
            executor,
            coordinator,
            profile,
        }
    }

    /// Sign in and persist the returned credential pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<CredentialPair, ApiError> {
        let body = serde_json::to_value(UserLogin {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(TransportError::from)?;

        let response = self
            .caller
            .execute(ApiRequest::post("auth/login").json(body))
            .await
            .map_err(ApiError::from)?;

        if !response.is_success() {
            return Err(ApiError::Rejected(response.error_detail()));
        }

        let tokens: TokenResponse = response.json().map_err(ApiError::from)?;
        let pair = CredentialPair::from(tokens);
        self.store.save(pair.clone()).await?;
        debug!(user_id = pair.user_id, "login succeeded");

        Ok(pair)
    }

    /// Create a new account. Does not sign in.
    pub async fn register(&self, registration: UserRegister) -> Result<ApiMessage, ApiError> {
        let body = serde_json::to_value(&registration).map_err(TransportError::from)?;

        let response = self
            .caller
            .execute(ApiRequest::post("auth/register").json(body))
            .await
            .map_err(ApiError::from)?;

        if !response.is_success() {
            return Err(ApiError::Rejected(response.error_detail()));
        }

        Ok(response.json().map_err(ApiError::from)?)
    }

    /// Fetch the signed-in user's profile and mirror it locally.
    pub async fn get_user(&self) -> Result<UserProfile, ApiError> {
        let caller = self.caller.clone();
        let profile_store = self.profile.clone();

        self.executor
            .execute_with_retry(
                "auth.get_user",
                move |token| {
                    let caller = caller.clone();
                    async move { caller.execute(ApiRequest::get("auth/get").bearer(token)).await }
                },
                move |response| async move {
                    let profile: UserProfile = response.json()?;
                    profile_store.save(profile.clone()).await;
                    Ok(profile)
                },
            )
            .await
    }

    /// Update nickname and/or avatar; mirrors the confirmed profile.
    pub async fn update_user(&self, update: UserUpdate) -> Result<UserProfile, ApiError> {
        let body = serde_json::to_value(&update).map_err(TransportError::from)?;
        let caller = self.caller.clone();
        let profile_store = self.profile.clone();

        self.executor
            .execute_with_retry(
                "auth.update_user",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(ApiRequest::put("auth/update").bearer(token).json(body))
                            .await
                    }
                },
                move |response| async move {
                    let profile: UserProfile = response.json()?;
                    profile_store.save(profile.clone()).await;
                    Ok(profile)
                },
            )
            .await
    }

    /// Delete the account and wipe local credentials and profile.
    pub async fn delete_account(&self) -> Result<ApiMessage, ApiError> {
        let caller = self.caller.clone();
        let store = self.store.clone();
        let profile_store = self.profile.clone();

        self.executor
            .execute_with_retry(
                "auth.delete_account",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(ApiRequest::delete("auth/delete").bearer(token))
                            .await
                    }
                },
                move |response| async move {
                    let message: ApiMessage = response.json()?;
                    store.clear().await?;
                    profile_store.clear().await;
                    Ok(message)
                },
            )
            .await
    }

    /// Explicit refresh, for callers that want to rotate ahead of expiry.
    pub async fn refresh_tokens(&self) -> Result<CredentialPair, ApiError> {
        self.coordinator.refresh().await
    }

    /// Ask the server whether `token` is still valid.
    pub async fn verify(&self, token: &str) -> Result<bool, ApiError> {
        let body = serde_json::to_value(VerifyRequest {
            token: token.to_string(),
        })
        .map_err(TransportError::from)?;

        let response = self
            .caller
            .execute(ApiRequest::post("auth/verify").json(body))
            .await
            .map_err(ApiError::from)?;

        Ok(response.is_success())
    }

    /// Whether a usable session exists: a valid access token, or a refresh
    /// token that still rotates.
    pub async fn logged_in(&self) -> Result<bool, ApiError> {
        let access = self.store.access_token().await?;
        let refresh = self.store.refresh_token().await?;

        let (access, refresh) = match (access, refresh) {
            (Some(a), Some(r)) if !a.is_empty() && !r.is_empty() => (a, r),
            _ => return Ok(false),
        };

        if self.verify(&access).await? {
            return Ok(true);
        }

        if self.verify(&refresh).await? {
            return Ok(self.coordinator.refresh().await.is_ok());
        }

        Ok(false)
    }

    /// Drop the local session. No remote call is made.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.store.clear().await?;
        self.profile.clear().await;
        Ok(())
    }

    /// Last profile confirmed by the server, if any.
    pub async fn cached_profile(&self) -> Option<UserProfile> {
        self.profile.get().await
    }
}
