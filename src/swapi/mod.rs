//! Outbound side: the fixed-page-size upstream catalog.
//!
//! The upstream answers `GET <base>/<collection>?page=<n>[&search=<s>]` with
//!
//! ```text
//! { "count": 82, "next": "https://…/people?page=2", "results": [ … ] }
//! ```
//!
//! where every page but the last holds exactly the upstream page size (10)
//! records. [`SwapiClient`] is the HTTP implementation of [`PageSource`];
//! the fetcher only ever sees the trait.

mod resource;

pub use resource::{Person, Planet, Resource, ResourceKind};

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// The page size the public catalog has always used.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// One upstream page.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    /// Size of the whole (search-filtered) collection, not of this page.
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// What the upstream reports for a page past the end of the collection.
    pub fn empty() -> Self {
        Self { count: 0, next: None, results: Vec::new() }
    }
}

/// Anything that can hand out upstream pages.
///
/// Implementations must not retry on their own: a page fetched twice may
/// not hold the same records.
pub trait PageSource: Send + Sync {
    /// Fixed number of records per page (the last page may hold fewer).
    fn page_size(&self) -> u64;

    /// Fetches page `number` (1-based) of `T`'s collection. An empty
    /// `search` means no filter.
    fn page<T: Resource>(
        &self,
        number: u64,
        search: &str,
    ) -> impl Future<Output = Result<Page<T>, FetchError>> + Send;

    /// Fetches the page behind a `next` link returned by a previous page.
    fn follow<T: Resource>(
        &self,
        next: &str,
    ) -> impl Future<Output = Result<Page<T>, FetchError>> + Send;
}

/// HTTP client for the upstream catalog.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct SwapiClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: u64,
}

impl SwapiClient {
    /// Builds a client for the catalog rooted at `base_url`
    /// (e.g. `https://swapi.dev/api`). `timeout` bounds every single upstream
    /// call; hitting it surfaces as [`FetchError::Transport`].
    pub fn new(mut base_url: Url, page_size: u64, timeout: Duration) -> Result<Self, reqwest::Error> {
        // `Url::join` replaces the last segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("holonet/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url, page_size })
    }

    /// URL of page `number` of `kind`, with the search filter when non-empty.
    pub fn page_url(&self, kind: ResourceKind, number: u64, search: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.join(kind.path())?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &number.to_string());
            if !search.is_empty() {
                query.append_pair("search", search);
            }
        }
        Ok(url)
    }

    async fn get<T: Resource>(&self, url: Url) -> Result<Page<T>, FetchError> {
        debug!(%url, "requesting upstream page");

        let response = self.http.get(url.clone()).send().await.map_err(|source| {
            FetchError::Transport { url: url.to_string(), source }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // The public catalog answers 404 for pages past the end.
            debug!(%url, "upstream page not found, treating as past the end");
            return Ok(Page::empty());
        }
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(|source| {
            FetchError::Transport { url: url.to_string(), source }
        })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl PageSource for SwapiClient {
    fn page_size(&self) -> u64 {
        self.page_size
    }

    async fn page<T: Resource>(&self, number: u64, search: &str) -> Result<Page<T>, FetchError> {
        let url = self.page_url(T::KIND, number, search)?;
        self.get(url).await
    }

    async fn follow<T: Resource>(&self, next: &str) -> Result<Page<T>, FetchError> {
        let url = Url::parse(next)?;
        self.get(url).await
    }
}
