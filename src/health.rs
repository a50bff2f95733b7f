//! Kubernetes health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Both are generic over the router state, so they register on any router:
//!
//! ```rust
//! use holonet::{Router, health};
//!
//! let app = Router::new(())
//!     .get("/healthz", health::liveness)
//!     .get("/readyz", health::readiness);
//! ```
//!
//! Readiness does not probe the upstream. An unreachable upstream already
//! turns each listing into a 500, and pulling every pod at once would not
//! help.

use std::sync::Arc;

use http::StatusCode;
use serde::Serialize;

use crate::{Request, Response};

#[derive(Serialize)]
struct Probe {
    status: &'static str,
}

/// Always `200 {"status":"ok"}`. If the process can answer HTTP, it is alive.
pub async fn liveness<S>(_: Arc<S>, _: Request) -> Response {
    Response::json(StatusCode::OK, &Probe { status: "ok" })
}

/// `200 {"status":"ready"}` once the router is serving.
pub async fn readiness<S>(_: Arc<S>, _: Request) -> Response {
    Response::json(StatusCode::OK, &Probe { status: "ready" })
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;
    use crate::Router;

    async fn probe(path: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new(())
            .get("/healthz", liveness)
            .get("/readyz", readiness);
        let res = app.respond(http::Request::get(path).body(()).unwrap()).await;
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn liveness_is_ok() {
        assert_eq!(probe("/healthz").await, (StatusCode::OK, serde_json::json!({ "status": "ok" })));
    }

    #[tokio::test]
    async fn readiness_is_ready() {
        assert_eq!(probe("/readyz").await, (StatusCode::OK, serde_json::json!({ "status": "ready" })));
    }
}
