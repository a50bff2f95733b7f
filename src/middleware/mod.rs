//! Middleware layer.
//!
//! Every request passes through the same two steps before it reaches a
//! handler:
//!
//! - [`request_id`] picks the id that correlates the request's log lines and
//!   its `x-request-id` response header.
//! - [`trace`] runs dispatch inside a `request` span and records status and
//!   latency once the response is ready.
//!
//! The order is fixed. There is no user-facing middleware API.

pub mod request_id;
mod trace;

use std::collections::HashMap;

use crate::request::Request;

pub(crate) use trace::run;

/// Copies the head of `req` into a [`Request`] with its id assigned.
///
/// Path parameters are filled in later, once the router has matched.
pub(crate) fn prepare<B>(req: &http::Request<B>) -> Request {
    let id = request_id::resolve(req.headers());
    Request::new(req, HashMap::new(), id)
}
