//! # Harmonia Core
//!
//! Core types and traits for the Harmonia binding layer.
//!
//! This crate provides the transport-agnostic foundation that the transport
//! binders (e.g. `harmonia-rest`) build on:
//!
//! - [`Service`] - The six-operation CRUD contract with rejecting defaults
//! - [`Params`] / [`Fragment`] - Per-request parameter assembly with a
//!   right-biased shallow merge
//! - [`Provider`] - The transport tag stamped into every merged request
//! - [`normalize_id`] - Identifier normalization for path-driven transports
//! - [`Middleware`] / [`MiddlewareSet`] - Declared middleware and the
//!   per-operation resolver
//! - [`ServiceError`] - HTTP-shaped errors with status codes and envelopes

#![doc(html_root_url = "https://docs.rs/harmonia-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod fixtures;
mod id;
mod middleware;
mod params;
mod provider;
mod service;

pub use error::{ErrorDetail, ErrorEnvelope, ServiceError, ServiceResult};
pub use id::{normalize_id, Id};
pub use middleware::{BoxMiddleware, FnMiddleware, Middleware, MiddlewareSet, MiddlewareSetBuilder};
pub use params::{Fragment, Params, ValueMap};
pub use provider::Provider;
pub use service::{BoxFuture, Operation, Service};
