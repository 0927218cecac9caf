use std::future::Future;

use crate::error::AppError;
use crate::models::{CachedToken, UpstreamResponse};

/// Persists the single cached bearer token.
pub trait TokenStore: Send + Sync + Clone {
    /// Load the cached token. Missing or unreadable caches yield `None`.
    fn load(&self) -> impl Future<Output = Option<CachedToken>> + Send;

    /// Replace the cached token.
    fn save(&self, token: &CachedToken) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// The three Japan Post Digital Address API calls this service makes.
///
/// Implementations only fail on transport errors; every HTTP status,
/// including 4xx/5xx, comes back as an [`UpstreamResponse`].
pub trait AddressApi: Send + Sync + Clone {
    /// `POST /api/v1/j/token` with the raw credentials document as body.
    fn request_token(
        &self,
        credentials: Vec<u8>,
    ) -> impl Future<Output = Result<UpstreamResponse, AppError>> + Send;

    /// `GET /api/v1/searchcode/{code}`.
    fn search_code(
        &self,
        token: &str,
        code: &str,
    ) -> impl Future<Output = Result<UpstreamResponse, AppError>> + Send;

    /// `POST /api/v1/addresszip` with `{"freeword": ...}`.
    fn address_zip(
        &self,
        token: &str,
        freeword: &str,
    ) -> impl Future<Output = Result<UpstreamResponse, AppError>> + Send;
}
