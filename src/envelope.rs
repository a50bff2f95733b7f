//! Response composer: the `{data, count}` envelope and its status code.

use http::StatusCode;
use serde::Serialize;

use crate::response::{IntoResponse, Response};

/// A caller page plus the upstream's count for the whole collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Listing<T> {
    pub data: Vec<T>,
    pub count: u64,
}

impl<T> Listing<T> {
    pub fn empty(count: u64) -> Self {
        Self { data: Vec::new(), count }
    }

    /// `206 Partial Content` whenever the page does not hold exactly the
    /// reported number of records, `200 OK` otherwise.
    ///
    /// 206 is used loosely here: it tells the caller the collection holds
    /// records beyond this page, not that a byte range was served.
    pub fn status(&self) -> StatusCode {
        if self.count != self.data.len() as u64 {
            StatusCode::PARTIAL_CONTENT
        } else {
            StatusCode::OK
        }
    }
}

impl<T: Serialize> IntoResponse for Listing<T> {
    fn into_response(self) -> Response {
        Response::json(self.status(), &self)
    }
}
