//! Per-request span with method, path, status and latency.

use std::time::Instant;

use http::HeaderValue;
use tracing::{Instrument, info, info_span};

use super::request_id::X_REQUEST_ID;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Dispatches `req` through `router` inside its `request` span and stamps
/// the request id on the response.
pub(crate) async fn run<S: Send + Sync + 'static>(router: &Router<S>, req: Request) -> Response {
    let span = info_span!(
        "request",
        request_id = %req.request_id(),
        method = %req.method(),
        path = %req.path(),
    );
    // Visible ASCII either way: a `to_str`-readable header or a uuid.
    let id = HeaderValue::from_str(req.request_id()).ok();

    let res = async {
        let started = Instant::now();
        let res = router.dispatch(req).await;
        info!(
            status = res.status_code().as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        res
    }
    .instrument(span)
    .await;

    match id {
        Some(id) => res.with_header(X_REQUEST_ID, id),
        None => res,
    }
}
