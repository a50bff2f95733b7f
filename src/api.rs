//! The public listing API.
//!
//! `GET /people` and `GET /planets` accept `page`, `pageSize`, `search`,
//! `sortField` and `sortOrder`, and answer
//!
//! ```text
//! { "data": [ … ], "count": 82 }
//! ```
//!
//! with `206 Partial Content` whenever `data` is not the whole collection.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::fetch;
use crate::health;
use crate::params::RequestParams;
use crate::request::Request;
use crate::response::{ApiError, IntoResponse, Response};
use crate::router::Router;
use crate::swapi::{PageSource, Person, Planet, Resource, SwapiClient};

/// Application state: the one upstream every handler reads from.
///
/// Built once in `main` and owned by the router.
pub struct Service<P = SwapiClient> {
    source: P,
}

impl Service {
    /// Builds the HTTP upstream client described by `config`.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = SwapiClient::new(
            config.upstream_url.clone(),
            config.upstream_page_size,
            config.upstream_timeout(),
        )?;
        Ok(Self::with_source(client))
    }
}

impl<P: PageSource> Service<P> {
    pub fn with_source(source: P) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &P {
        &self.source
    }
}

/// Routes of the whole service, health probes included.
pub fn app<P: PageSource + 'static>(service: Service<P>) -> Router<Service<P>> {
    Router::new(service)
        .get("/people", listing::<Person, P>)
        .get("/planets", listing::<Planet, P>)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

/// Lists one upstream collection as asked by the request query.
pub async fn listing<T, P>(svc: Arc<Service<P>>, req: Request) -> Response
where
    T: Resource,
    P: PageSource,
{
    info!(resource = %T::KIND, "listing requested");

    let params = match RequestParams::from_request(&req) {
        Ok(params) => params,
        Err(e) => {
            warn!(resource = %T::KIND, code = e.code(), "rejected listing parameters");
            return e.into_response();
        }
    };

    match fetch::list::<T, P>(&svc.source, &params).await {
        Ok(listing) => listing.into_response(),
        Err(e) => {
            error!(resource = %T::KIND, "failed to list collection: {e}");
            ApiError::from(&e).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::Value;

    use super::*;
    use crate::fetch::tests::Catalog;

    async fn get(app: &Router<Service<Catalog>>, uri: &str) -> (StatusCode, Value) {
        let res = app.respond(http::Request::get(uri).body(()).unwrap()).await;
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn names(body: &Value) -> Vec<&str> {
        body["data"].as_array().unwrap().iter().map(|r| r["name"].as_str().unwrap()).collect()
    }

    #[tokio::test]
    async fn default_page_of_a_larger_collection_is_partial() {
        let app = app(Service::with_source(Catalog::new(82, 10)));
        let (status, body) = get(&app, "/people").await;

        assert_eq!(status, StatusCode::PARTIAL_CONTENT);
        assert_eq!(body["count"], 82);
        assert_eq!(names(&body).len(), 15);
        assert_eq!(names(&body)[0], "Name-0");
    }

    #[tokio::test]
    async fn whole_collection_is_ok() {
        let app = app(Service::with_source(Catalog::new(7, 10)));
        let (status, body) = get(&app, "/planets?pageSize=20").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 7);
    }

    #[tokio::test]
    async fn invalid_parameters_never_reach_the_upstream() {
        let app = app(Service::with_source(Catalog::new(82, 10)));
        let (status, body) = get(&app, "/people?pageSize=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "INVALID_PAGE_SIZE");
        assert_eq!(app.state().source().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sorted_listing_walks_the_whole_collection() {
        let app = app(Service::with_source(Catalog::new(25, 10)));
        let (status, body) = get(&app, "/planets?sortField=created&pageSize=3").await;

        assert_eq!(status, StatusCode::PARTIAL_CONTENT);
        // Highest index was created first.
        assert_eq!(names(&body), ["Name-24", "Name-23", "Name-22"]);
        assert_eq!(app.state().source().calls.load(Ordering::SeqCst), 3);
    }
}
