use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A bearer token as persisted in the token cache.
///
/// `issued_at` is optional on read so that cache files written without it
/// can still be loaded; the store fills it in from file metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    pub token: String,
    /// Lifetime in seconds, counted from `issued_at`.
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    pub fn new(token: impl Into<String>, expires_in: i64, issued_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_in,
            issued_at: Some(issued_at),
        }
    }

    /// Instant after which the token must be refreshed.
    ///
    /// `None` when the issue time is unknown or the lifetime does not fit
    /// in a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let lifetime = Duration::try_seconds(self.expires_in)?;
        self.issued_at?.checked_add_signed(lifetime)
    }

    /// Valid iff `now < issued_at + expires_in`. A token with no known
    /// issue time or an unrepresentable lifetime is never valid.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires| now < expires)
    }
}

/// Successful body of `POST /api/v1/j/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    /// Missing lifetimes are treated as already expired.
    #[serde(default)]
    pub expires_in: i64,
}

impl TokenResponse {
    /// Decode the token endpoint body, failing with
    /// [`AppError::InvalidTokenResponse`] when `token` is absent or the body
    /// is not JSON.
    pub fn parse(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body).map_err(|e| AppError::InvalidTokenResponse(e.to_string()))
    }

    pub fn into_cached(self, issued_at: DateTime<Utc>) -> CachedToken {
        CachedToken::new(self.token, self.expires_in, issued_at)
    }
}

/// Status and raw body of an upstream call, relayed verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Body of `POST /api/v1/addresszip`.
#[derive(Debug, Clone, Serialize)]
pub struct FreewordRequest<'a> {
    pub freeword: &'a str,
}
