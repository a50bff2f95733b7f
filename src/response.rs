//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] (or anything [`IntoResponse`]) and return
//! it; the server converts it into a hyper response at the very end.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

use crate::error::Error;
use crate::params::ParamError;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use holonet::Response;
/// use http::StatusCode;
///
/// Response::json(StatusCode::OK, &serde_json::json!({ "status": "ok" }));
/// Response::text("hello");
/// Response::status(StatusCode::NO_CONTENT);
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(HeaderName, HeaderValue)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// Serializes `body` as JSON. A value that fails to serialize turns the
    /// response into the generic internal error.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => Self::with_body(status, JSON, bytes),
            Err(e) => {
                error!("failed to serialize response body: {e}");
                ApiError::internal().into_response()
            }
        }
    }

    /// `200 OK`, `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_body(StatusCode::OK, TEXT, body.into().into_bytes())
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Appends a header. Returns `self` for chaining.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }

    fn with_body(status: StatusCode, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![(CONTENT_TYPE, HeaderValue::from_static(content_type))],
            status,
        }
    }

    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status;
        let headers = res.headers_mut();
        for (name, value) in self.headers {
            headers.append(name, value);
        }
        res
    }
}

// ── ApiError ─────────────────────────────────────────────────────────────────

/// Error body sent to callers: `{"error_code": …, "error_message": …}`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error_code: &'static str,
    pub error_message: String,
}

impl ApiError {
    pub const INTERNAL_CODE: &'static str = "INTERNAL_SERVER_ERROR";
    pub const INTERNAL_MESSAGE: &'static str = "An internal server error occurred.";

    /// The one body every server-side failure collapses into. Details go to
    /// the log, never to the caller.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: Self::INTERNAL_CODE,
            error_message: Self::INTERNAL_MESSAGE.to_owned(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error_code: "NOT_FOUND",
            error_message: "The requested resource does not exist.".to_owned(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            error_code: "METHOD_NOT_ALLOWED",
            error_message: "The method is not allowed on this resource.".to_owned(),
        }
    }
}

impl From<ParamError> for ApiError {
    fn from(e: ParamError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error_code: e.code(),
            error_message: e.to_string(),
        }
    }
}

impl From<&Error> for ApiError {
    fn from(_: &Error) -> Self {
        Self::internal()
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a [`StatusCode`] directly from a handler: `return StatusCode::NO_CONTENT`
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response { Response::json(self.status, &self) }
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response { ApiError::from(self).into_response() }
}

impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(res: &Response) -> serde_json::Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[test]
    fn json_sets_status_and_content_type() {
        let res = Response::json(StatusCode::PARTIAL_CONTENT, &serde_json::json!({ "count": 1 }));
        let inner = res.into_inner();

        assert_eq!(inner.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(inner.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn param_errors_render_as_bad_request() {
        let res = ParamError::InvalidPageSize.into_response();

        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body(&res),
            serde_json::json!({
                "error_code": "INVALID_PAGE_SIZE",
                "error_message": "The page size must be a number greater than 0.",
            })
        );
    }

    #[test]
    fn internal_errors_hide_the_detail() {
        let err = Error::InvalidSortField("height".into());
        let res = ApiError::from(&err).into_response();

        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(&res)["error_code"], "INTERNAL_SERVER_ERROR");
        assert!(!String::from_utf8_lossy(res.body()).contains("height"));
    }

    #[test]
    fn extra_headers_are_kept() {
        let res = Response::text("ok")
            .with_header(HeaderName::from_static("x-request-id"), HeaderValue::from_static("abc"))
            .into_inner();

        assert_eq!(res.headers()["x-request-id"], "abc");
        assert_eq!(res.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
    }
}
