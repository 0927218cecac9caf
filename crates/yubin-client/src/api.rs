use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use url::Url;
use yubin_core::error::AppError;
use yubin_core::models::{FreewordRequest, UpstreamResponse};
use yubin_core::traits::AddressApi;

pub const DEFAULT_BASE_URL: &str = "https://api.da.pf.japanpost.jp";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const TOKEN_PATH: &[&str] = &["api", "v1", "j", "token"];
const SEARCHCODE_PATH: &[&str] = &["api", "v1", "searchcode"];
const ADDRESSZIP_PATH: &[&str] = &["api", "v1", "addresszip"];

/// Digital Address API client using reqwest.
///
/// Every HTTP status is handed back as an [`UpstreamResponse`]; only
/// transport failures (connect, timeout, truncated body) become errors.
#[derive(Clone)]
pub struct ReqwestAddressApi {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl ReqwestAddressApi {
    pub fn with_base_url(base_url: &str) -> Result<Self, AppError> {
        Self::build(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(self, timeout: Duration) -> Result<Self, AppError> {
        Self::build(self.base_url.as_str(), timeout)
    }

    fn build(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            AppError::ConfigError(format!("Invalid upstream base URL '{base_url}': {e}"))
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::ConfigError(format!(
                "Upstream base URL must be an http(s) URL, got '{base_url}'"
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("yubin/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: parsed,
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, prefix: &[&str], tail: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(prefix).extend(tail);
        }
        url
    }

    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<UpstreamResponse, AppError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::UpstreamProxyError(format!(
                    "{endpoint} timed out after {} seconds",
                    self.timeout_secs
                ))
            } else if e.is_connect() {
                AppError::UpstreamProxyError(format!("Connection to {endpoint} failed: {e}"))
            } else {
                AppError::UpstreamProxyError(format!("{endpoint} request failed: {e}"))
            }
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            AppError::UpstreamProxyError(format!("Failed to read {endpoint} response body: {e}"))
        })?;

        tracing::debug!(endpoint, status, bytes = body.len(), "Upstream responded");
        Ok(UpstreamResponse::new(status, body.to_vec()))
    }
}

impl AddressApi for ReqwestAddressApi {
    async fn request_token(&self, credentials: Vec<u8>) -> Result<UpstreamResponse, AppError> {
        let request = self
            .client
            .post(self.endpoint(TOKEN_PATH, None))
            .header(CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", "127.0.0.1")
            .body(credentials);

        self.send("token", request).await
    }

    async fn search_code(&self, token: &str, code: &str) -> Result<UpstreamResponse, AppError> {
        let request = self
            .client
            .get(self.endpoint(SEARCHCODE_PATH, Some(code)))
            .bearer_auth(token);

        self.send("searchcode", request).await
    }

    async fn address_zip(&self, token: &str, freeword: &str) -> Result<UpstreamResponse, AppError> {
        let request = self
            .client
            .post(self.endpoint(ADDRESSZIP_PATH, None))
            .bearer_auth(token)
            .json(&FreewordRequest { freeword });

        self.send("addresszip", request).await
    }
}
