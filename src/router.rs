//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler.

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use bytes::Bytes;
use futures::FutureExt;
use http::Method;
use http_body_util::Full;
use matchit::Router as MatchitRouter;
use tracing::error;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware;
use crate::request::Request;
use crate::response::{ApiError, IntoResponse, Response};

/// The application router, owning the application state `S`.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so they chain naturally.
pub struct Router<S> {
    state: Arc<S>,
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
}

pub(crate) enum Lookup<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    /// The path exists, but not for this method.
    MethodNotAllowed,
    NotFound,
}

impl<S: Send + Sync + 'static> Router<S> {
    pub fn new(state: S) -> Self {
        Self { state: Arc::new(state), routes: HashMap::new() }
    }

    /// The shared application state.
    pub fn state(&self) -> &Arc<S> {
        &self.state
    }

    /// Registers a `GET` handler. Returns `self` for chaining.
    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Lookup<S> {
        if let Some(matched) = self.routes.get(method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(handler, params);
        }

        let elsewhere = self.routes.iter()
            .any(|(m, tree)| m != method && tree.at(path).is_ok());
        if elsewhere { Lookup::MethodNotAllowed } else { Lookup::NotFound }
    }

    /// Routes one request through the middleware stack and returns the
    /// finished response.
    ///
    /// The request body is ignored: every route is a read. Only the head is
    /// copied out, so the returned future does not hold on to `req`.
    pub fn respond<B>(
        &self,
        req: http::Request<B>,
    ) -> impl Future<Output = http::Response<Full<Bytes>>> + Send + '_ {
        let req = middleware::prepare(&req);
        async move { middleware::run(self, req).await.into_inner() }
    }

    /// Runs the matched handler. A panic inside it is contained to this
    /// request; dropping the returned future cancels the handler with it.
    pub(crate) async fn dispatch(&self, req: Request) -> Response {
        let (handler, params) = match self.lookup(req.method(), req.path()) {
            Lookup::Found(handler, params) => (handler, params),
            Lookup::MethodNotAllowed => return ApiError::method_not_allowed().into_response(),
            Lookup::NotFound => return ApiError::not_found().into_response(),
        };

        let req = Request { params, ..req };
        let fut = handler.call(Arc::clone(&self.state), req);
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(res) => res,
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("non-string panic payload");
                error!(reason, "handler panicked");
                ApiError::internal().into_response()
            }
        }
    }
}
