//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{CachedToken, UpstreamResponse};
use crate::traits::{AddressApi, TokenStore};

pub const MOCK_TOKEN: &str = "mock-token";

/// Body the mock token endpoint returns by default.
pub fn token_body(token: &str, expires_in: i64) -> Vec<u8> {
    serde_json::json!({
        "scope": "J1",
        "token_type": "Bearer",
        "expires_in": expires_in,
        "token": token,
    })
    .to_string()
    .into_bytes()
}

// ---------------------------------------------------------------------------
// MockAddressApi
// ---------------------------------------------------------------------------

/// A call recorded by [`MockAddressApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    RequestToken { credentials: Vec<u8> },
    SearchCode { token: String, code: String },
    AddressZip { token: String, freeword: String },
}

type Responses = Arc<Mutex<Vec<Result<UpstreamResponse, AppError>>>>;

/// Mock upstream API with queued responses and a call log.
///
/// Each call pops the first queued response for its endpoint. When the
/// queue is empty, the token endpoint issues [`MOCK_TOKEN`] valid for 600s
/// and the search endpoints answer `200 {"addresses":[]}`.
#[derive(Clone, Default)]
pub struct MockAddressApi {
    token_responses: Responses,
    search_responses: Responses,
    calls: Arc<Mutex<Vec<ApiCall>>>,
}

impl MockAddressApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_response(self, response: UpstreamResponse) -> Self {
        self.token_responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_token_error(self, error: AppError) -> Self {
        self.token_responses.lock().unwrap().push(Err(error));
        self
    }

    pub fn with_search_response(self, response: UpstreamResponse) -> Self {
        self.search_responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_search_error(self, error: AppError) -> Self {
        self.search_responses.lock().unwrap().push(Err(error));
        self
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made to the token endpoint.
    pub fn token_requests(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, ApiCall::RequestToken { .. }))
            .count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_token(&self) -> Result<UpstreamResponse, AppError> {
        let mut responses = self.token_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(UpstreamResponse::new(200, token_body(MOCK_TOKEN, 600)))
        } else {
            responses.remove(0)
        }
    }

    fn next_search(&self) -> Result<UpstreamResponse, AppError> {
        let mut responses = self.search_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(UpstreamResponse::new(200, r#"{"addresses":[]}"#))
        } else {
            responses.remove(0)
        }
    }
}

impl AddressApi for MockAddressApi {
    async fn request_token(&self, credentials: Vec<u8>) -> Result<UpstreamResponse, AppError> {
        self.record(ApiCall::RequestToken { credentials });
        self.next_token()
    }

    async fn search_code(&self, token: &str, code: &str) -> Result<UpstreamResponse, AppError> {
        self.record(ApiCall::SearchCode {
            token: token.to_string(),
            code: code.to_string(),
        });
        self.next_search()
    }

    async fn address_zip(&self, token: &str, freeword: &str) -> Result<UpstreamResponse, AppError> {
        self.record(ApiCall::AddressZip {
            token: token.to_string(),
            freeword: freeword.to_string(),
        });
        self.next_search()
    }
}

// ---------------------------------------------------------------------------
// MockTokenStore
// ---------------------------------------------------------------------------

/// Token store that records saves and can be made to fail them.
#[derive(Clone, Default)]
pub struct MockTokenStore {
    pub loaded: Arc<Mutex<Option<CachedToken>>>,
    pub saved: Arc<Mutex<Vec<CachedToken>>>,
    save_error: Arc<Mutex<Option<AppError>>>,
}

impl MockTokenStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_token(token: CachedToken) -> Self {
        Self {
            loaded: Arc::new(Mutex::new(Some(token))),
            ..Self::default()
        }
    }

    pub fn with_save_error(error: AppError) -> Self {
        Self {
            save_error: Arc::new(Mutex::new(Some(error))),
            ..Self::default()
        }
    }
}

impl TokenStore for MockTokenStore {
    async fn load(&self) -> Option<CachedToken> {
        self.loaded.lock().unwrap().clone()
    }

    async fn save(&self, token: &CachedToken) -> Result<(), AppError> {
        if let Some(e) = self.save_error.lock().unwrap().take() {
            return Err(e);
        }
        self.saved.lock().unwrap().push(token.clone());
        *self.loaded.lock().unwrap() = Some(token.clone());
        Ok(())
    }
}
