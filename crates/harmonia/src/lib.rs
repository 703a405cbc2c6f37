//! # Harmonia
//!
//! **CRUD resource-to-route binding for the Themis Platform**
//!
//! Harmonia is the binding layer between an abstract resource service and a
//! concrete route table:
//!
//! - 🧩 **One contract, many transports** – Implement six operations once;
//!   transports bind them to their own routing surface
//! - 🗺️ **Deterministic route tables** – Every resource gets the same 8
//!   registrations, overridden or not
//! - 🔗 **Ordered middleware** – Caller-supplied, service-level, and
//!   operation-level middleware compose in a fixed, declared order
//! - 📦 **Uniform parameters** – Query, provider tag, and transport context
//!   merge into a single value with a stable right-biased policy
//!
//! ## Quick Start
//!
//! ```rust
//! use harmonia::prelude::*;
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! /// A read-only service exposing a fixed listing.
//! struct StatusService;
//!
//! impl Service for StatusService {
//!     fn index<'a>(&'a self, _params: Params) -> BoxFuture<'a, ServiceResult<Value>> {
//!         Box::pin(async { Ok(json!([{"status": "ok"}])) })
//!     }
//! }
//!
//! let routes = bind(&(Arc::new(StatusService) as Arc<dyn Service>), &[]);
//! assert_eq!(routes.len(), 8);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Request → middleware (caller ++ service ++ operation) → handler
//!                                                            ↓
//!                        normalize id → merge params → Service operation
//! ```

#![doc(html_root_url = "https://docs.rs/harmonia/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use harmonia_core as core;

// Re-export the REST binding
pub use harmonia_rest as rest;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use harmonia::prelude::*;
/// ```
pub mod prelude {
    pub use harmonia_core::{
        normalize_id, BoxFuture, BoxMiddleware, Fragment, Id, Middleware, MiddlewareSet,
        Operation, Params, Provider, Service, ServiceError, ServiceResult, ValueMap,
    };

    // Re-export the REST binder and its route-table types
    pub use harmonia_rest::{bind, RoutePath, RouteRequest, RouteResponse, RouteSet};
}
