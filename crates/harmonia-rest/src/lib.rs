//! # Harmonia REST
//!
//! REST route binding for Harmonia resource services.
//!
//! This crate turns a [`harmonia_core::Service`] into a REST route table:
//!
//! - [`bind`] - Generates the 8 route registrations for one resource
//! - [`RouteRegistration`] / [`RouteSet`] - What the external router owns
//! - [`RouteRequest`] / [`RouteResponse`] - The modeled transport boundary
//!
//! The HTTP server itself (path matching, sockets, body parsing) is an
//! external collaborator; [`RouteSet::dispatch`] stands in for it where a
//! route table needs to be driven directly, e.g. in tests.

#![doc(html_root_url = "https://docs.rs/harmonia-rest/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binder;
mod request;
mod route;

pub use binder::bind;
pub use request::{RouteRequest, RouteResponse};
pub use route::{BoxHandler, RouteKind, RoutePath, RouteRegistration, RouteSet};
