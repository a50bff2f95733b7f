//! Request id assignment.

use http::HeaderMap;
use http::header::HeaderName;
use uuid::Uuid;

/// Header carrying the request id, inbound and outbound.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Returns the caller's `x-request-id` when it is present, readable and not
/// blank; a fresh UUID v4 otherwise.
pub fn resolve(headers: &HeaderMap) -> String {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn honours_inbound_id() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));

        assert_eq!(resolve(&headers), "abc-123");
    }

    #[test]
    fn generates_when_missing_or_blank() {
        let mut blank = HeaderMap::new();
        blank.insert(X_REQUEST_ID, HeaderValue::from_static("  "));

        for headers in [HeaderMap::new(), blank] {
            let id = resolve(&headers);
            assert!(Uuid::parse_str(&id).is_ok(), "{id:?} is not a uuid");
        }
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(resolve(&HeaderMap::new()), resolve(&HeaderMap::new()));
    }
}
