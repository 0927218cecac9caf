use std::sync::LazyLock;

use regex::Regex;

/// Which upstream endpoint a search term is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Postal code or 7-character business/digital-address code:
    /// `GET /api/v1/searchcode/{code}`.
    ZipOrCode,
    /// Anything else: `POST /api/v1/addresszip` with `{"freeword": ...}`.
    Freeform,
}

// Both alternatives are anchored as a group. `\w` and `\d` are ASCII-only.
static ZIP_OR_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{3,7}|[A-Za-z0-9_]{7})$").expect("static pattern is valid")
});

/// Classify a search term.
///
/// `ZipOrCode` iff the whole string is 3–7 ASCII digits or exactly 7 ASCII
/// word characters (letters, digits, underscore).
pub fn classify(query: &str) -> SearchKind {
    if ZIP_OR_CODE.is_match(query) {
        SearchKind::ZipOrCode
    } else {
        SearchKind::Freeform
    }
}
