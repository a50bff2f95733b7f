//! # holonet
//!
//! Variable-size pages, search and sorting in front of the Star Wars API.
//!
//! The upstream catalog serves its collections in fixed pages of ten. holonet
//! lets callers pick any page size, re-cuts the upstream pages to fit, and
//! can sort a whole collection by `name` or `created` before cutting it.
//!
//! ## Layout
//!
//! - [`params`] validates the query of a listing request.
//! - [`pagination`] maps a caller page onto upstream pages.
//! - [`fetch`] reads from a [`swapi::PageSource`], windowed or whole.
//! - [`sort`] orders a whole collection and cuts the caller's window.
//! - [`envelope`] is the `{data, count}` body and its 200 / 206 status.
//! - [`api`] wires it all into handlers on a [`Router`].
//!
//! The HTTP layer underneath is small: radix-tree routing via [`matchit`],
//! hyper for the wire, and graceful shutdown on SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use holonet::{Server, api, config::Config};
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::parse();
//!     let service = api::Service::new(&config)?;
//!     Server::bind(config.bind).serve(api::app(service)).await?;
//!     Ok(())
//! }
//! ```

mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod health;
pub mod middleware;
pub mod pagination;
pub mod params;
pub mod sort;
pub mod swapi;

pub use envelope::Listing;
pub use error::{Error, FetchError};
pub use handler::Handler;
pub use request::Request;
pub use response::{ApiError, IntoResponse, Response};
pub use router::Router;
pub use server::Server;
