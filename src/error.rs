use thiserror::Error;

use crate::credentials::StoreError;
use crate::mirror::CacheError;
use crate::transport::TransportError;

/// Error returned by every public API operation.
///
/// Nothing past the request executor boundary panics or propagates a raw
/// transport fault; all failure modes are folded into this type and the
/// `Display` text is suitable for showing to a user.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the credential on both attempts.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// No refresh token is stored; the caller must re-authenticate.
    #[error("no refresh token available")]
    RefreshUnavailable,

    /// The remote authority declined the refresh token.
    #[error("token refresh rejected: {0}")]
    RefreshRejected(String),

    /// Any non-auth failure status; carries the server-provided detail
    /// message verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("local cache error: {0}")]
    Cache(#[from] CacheError),
}

impl ApiError {
    /// True for the two terminal refresh outcomes that should push the user
    /// back to the login screen.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ApiError::RefreshUnavailable | ApiError::RefreshRejected(_)
        )
    }
}
