//! HTTP handlers
//!
//! Axum request handlers for the dashboard pages and the JSON API.
//! Pages support content negotiation: `Accept: application/json` returns the
//! widget tree, anything else the rendered HTML.

pub mod admin;
pub mod datasets;
pub mod pages;
pub mod reports;

use axum::http::{header, HeaderMap};

pub use admin::reload;
pub use datasets::{get_dataset, list_datasets};
pub use pages::{get_dashboard, get_page, root};
pub use reports::{list_reports, run_report};

/// Check if the client wants JSON response
pub fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn json_only_when_asked() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        assert!(!wants_json(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain"),
        );
        assert!(wants_json(&headers));
    }
}
