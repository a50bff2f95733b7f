//! Error types.
//!
//! Client mistakes (bad page, bad sort criteria) never become an [`Error`];
//! they are [`ParamError`](crate::params::ParamError)s rendered as `400`.
//! This module covers the failures that are the service's own problem:
//! binding a socket, talking to the upstream, or a sort field that slipped
//! past validation.

use thiserror::Error;

/// The crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Binding or accepting on the listening socket failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching from the upstream catalog failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A sort field outside `name` / `created` reached the sort engine.
    #[error("invalid sort field `{0}`")]
    InvalidSortField(String),
}

/// Failure while reading a page from the upstream catalog.
///
/// Every variant aborts the whole inbound request. Nothing is retried: the
/// upstream may have changed between calls, so a retried page could shift
/// the window.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, or timeout failure.
    #[error("error while requesting {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status other than 404.
    #[error("upstream answered {status} for {url}")]
    Status { url: String, status: u16 },

    /// The body was not a `{count, next, results}` page.
    #[error("error while decoding the response of {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A page or `next` URL could not be built or parsed.
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),
}
