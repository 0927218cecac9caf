use thiserror::Error;

/// Application-wide error types for yubin.
#[derive(Error, Debug)]
pub enum AppError {
    /// Local configuration is missing or unusable (e.g. no credentials file).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The token endpoint answered with something other than 200.
    ///
    /// The upstream status and body are relayed to the caller untouched.
    #[error("Token endpoint returned HTTP {status}")]
    UpstreamTokenError { status: u16, body: Vec<u8> },

    /// The token endpoint answered 200 but the body is not a usable token.
    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    /// Network failure while talking to the upstream API.
    #[error("Upstream request failed: {0}")]
    UpstreamProxyError(String),

    /// The incoming request could not be turned into a search term.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The token cache could not be written.
    #[error("Token storage error: {0}")]
    StorageError(String),
}
