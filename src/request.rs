//! Incoming HTTP request type.

use std::collections::HashMap;

use http::{HeaderMap, Method};

/// An incoming HTTP request, as handed to a handler.
///
/// Listing endpoints are `GET`-only, so the body is never read.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HeaderMap,
    pub(crate) params: HashMap<String, String>,
    pub(crate) request_id: String,
}

impl Request {
    pub(crate) fn new<B>(
        req: &http::Request<B>,
        params: HashMap<String, String>,
        request_id: String,
    ) -> Self {
        let query = req
            .uri()
            .query()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        Self {
            method: req.method().clone(),
            path: req.uri().path().to_owned(),
            query,
            headers: req.headers().clone(),
            params,
            request_id,
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }

    /// Id correlating this request's log lines and its `x-request-id`
    /// response header.
    pub fn request_id(&self) -> &str { &self.request_id }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// First value of a query parameter, percent-decoded.
    ///
    /// `?search=` yields `Some("")`; a missing key yields `None`.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/films/{id}`, `req.param("id")` on `/films/4` returns `Some("4")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request {
        let raw = http::Request::builder()
            .uri(uri)
            .header("X-Trace", "abc")
            .body(())
            .unwrap();
        Request::new(&raw, HashMap::new(), "req-1".to_owned())
    }

    #[test]
    fn decodes_query_values() {
        let req = request("/people?search=luke%20sky&page=2&page=3");

        assert_eq!(req.path(), "/people");
        assert_eq!(req.query("search"), Some("luke sky"));
        assert_eq!(req.query("page"), Some("2"));
        assert_eq!(req.query("pageSize"), None);
    }

    #[test]
    fn empty_value_is_present() {
        let req = request("/planets?sortField=&sortOrder=desc");

        assert_eq!(req.query("sortField"), Some(""));
        assert_eq!(req.query("sortOrder"), Some("desc"));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = request("/");

        assert_eq!(req.header("x-trace"), Some("abc"));
        assert_eq!(req.request_id(), "req-1");
    }
}
