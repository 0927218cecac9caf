use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use url::form_urlencoded;

use yubin_core::UpstreamResponse;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub search_code: Option<String>,
}

impl SearchParams {
    /// Read `search_code` from a raw query string.
    ///
    /// The first occurrence wins and malformed percent-escapes decode
    /// lossily, so no query string is ever rejected.
    pub fn from_query(raw: Option<&str>) -> Self {
        let search_code = raw.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "search_code")
                .map(|(_, value)| value.into_owned())
        });
        Self { search_code }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// An upstream response passed through with its own status and body.
pub struct Relay(pub UpstreamResponse);

impl IntoResponse for Relay {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::BAD_GATEWAY);
        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            self.0.body,
        )
            .into_response()
    }
}
