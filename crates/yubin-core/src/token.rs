use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{CachedToken, TokenResponse};
use crate::traits::{AddressApi, TokenStore};

/// Resolves a usable bearer token: cached if still valid, otherwise fetched
/// from the token endpoint and written back to the store.
///
/// There is no in-process cache and no locking. Every call consults the
/// store afresh; concurrent refreshes simply overwrite each other with
/// equally valid tokens.
#[derive(Clone)]
pub struct TokenResolver<S, A>
where
    S: TokenStore,
    A: AddressApi,
{
    store: S,
    api: A,
    credentials_path: PathBuf,
}

impl<S, A> TokenResolver<S, A>
where
    S: TokenStore,
    A: AddressApi,
{
    pub fn new(store: S, api: A, credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            api,
            credentials_path: credentials_path.into(),
        }
    }

    /// Resolve a token as of now.
    pub async fn resolve(&self) -> Result<String, AppError> {
        self.resolve_at(Utc::now()).await
    }

    /// Resolve a token as of `now`.
    ///
    /// Errors:
    /// - [`AppError::ConfigError`] if the credentials file is missing; no
    ///   request is made.
    /// - [`AppError::UpstreamTokenError`] if the token endpoint answers non-200.
    /// - [`AppError::InvalidTokenResponse`] if a 200 body carries no token.
    pub async fn resolve_at(&self, now: DateTime<Utc>) -> Result<String, AppError> {
        if let Some(cached) = self.store.load().await {
            if cached.is_valid_at(now) {
                tracing::debug!(expires_at = ?cached.expires_at(), "Using cached access token");
                return Ok(cached.token);
            }
            tracing::info!(expires_at = ?cached.expires_at(), "Cached access token expired");
        }

        let fresh = self.fetch(now).await?;
        Ok(fresh.token)
    }

    async fn fetch(&self, now: DateTime<Utc>) -> Result<CachedToken, AppError> {
        let credentials = self.read_credentials().await?;

        let response = self.api.request_token(credentials).await?;
        if !response.is_ok() {
            tracing::warn!(status = response.status, "Token endpoint rejected the request");
            return Err(AppError::UpstreamTokenError {
                status: response.status,
                body: response.body,
            });
        }

        let token = TokenResponse::parse(&response.body)?.into_cached(now);
        self.store.save(&token).await?;

        tracing::info!(expires_in = token.expires_in, "Fetched new access token");
        Ok(token)
    }

    async fn read_credentials(&self) -> Result<Vec<u8>, AppError> {
        tokio::fs::read(&self.credentials_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AppError::ConfigError(format!(
                    "credentials file not found: {}",
                    self.credentials_path.display()
                )),
                _ => AppError::ConfigError(format!(
                    "Failed to read credentials file {}: {e}",
                    self.credentials_path.display()
                )),
            })
    }
}
