use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::classify::{SearchKind, classify};
use crate::error::AppError;
use crate::models::UpstreamResponse;
use crate::token::TokenResolver;
use crate::traits::{AddressApi, TokenStore};

/// Forwards a search term to the Digital Address API.
///
/// Generic over the token store and the upstream client via traits, so the
/// dispatch logic can be tested without real HTTP or filesystem access.
#[derive(Clone)]
pub struct ProxyService<S, A>
where
    S: TokenStore,
    A: AddressApi,
{
    tokens: TokenResolver<S, A>,
    api: A,
}

impl<S, A> ProxyService<S, A>
where
    S: TokenStore,
    A: AddressApi,
{
    pub fn new(store: S, api: A, credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            tokens: TokenResolver::new(store, api.clone(), credentials_path),
            api,
        }
    }

    /// Resolve a token, then forward `query` to the endpoint its
    /// classification selects. The upstream response comes back unchanged,
    /// whatever its status.
    pub async fn search(&self, query: &str) -> Result<UpstreamResponse, AppError> {
        self.search_at(query, Utc::now()).await
    }

    pub async fn search_at(
        &self,
        query: &str,
        now: DateTime<Utc>,
    ) -> Result<UpstreamResponse, AppError> {
        let token = self.tokens.resolve_at(now).await?;

        let kind = classify(query);
        tracing::debug!(?kind, query, "Forwarding search");

        let response = match kind {
            SearchKind::ZipOrCode => self.api.search_code(&token, query).await,
            SearchKind::Freeform => self.api.address_zip(&token, query).await,
        }
        .inspect_err(|e| tracing::error!(?kind, "Upstream search failed: {e}"))?;

        if response.status >= 400 {
            tracing::info!(?kind, status = response.status, "Upstream returned an error status");
        }

        Ok(response)
    }
}
