//! The abstract CRUD service contract.
//!
//! A [`Service`] exposes up to six operations over a collection of domain
//! entities. Transport layers (REST, sockets, query-language gateways) bind
//! these operations to their own routing surface; the contract itself is
//! transport-agnostic.
//!
//! Every operation has a default body that rejects with
//! "method not allowed", so a concrete service overrides only the subset it
//! supports. All operations are asynchronous and may suspend on I/O inside
//! the concrete implementation; the binding layers treat them as opaque.
//!
//! # Example
//!
//! ```
//! use harmonia_core::{BoxFuture, Params, Service, ServiceResult};
//! use serde_json::{json, Value};
//!
//! /// A read-only service exposing a fixed listing.
//! struct StatusService;
//!
//! impl Service for StatusService {
//!     fn index<'a>(&'a self, _params: Params) -> BoxFuture<'a, ServiceResult<Value>> {
//!         Box::pin(async { Ok(json!([{"status": "ok"}])) })
//!     }
//! }
//! ```

use crate::{Id, MiddlewareSet, Params, ServiceError, ServiceResult};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// A boxed future returned by object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The six operations a service can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List the collection.
    Index,
    /// Fetch a single resource.
    Read,
    /// Create a resource.
    Create,
    /// Replace a resource wholesale.
    Update,
    /// Partially update a resource.
    Modify,
    /// Remove one resource, or the collection in bulk.
    Remove,
}

impl Operation {
    /// All operations, in route-registration order.
    pub const ALL: [Self; 6] = [
        Self::Index,
        Self::Read,
        Self::Create,
        Self::Update,
        Self::Modify,
        Self::Remove,
    ];

    /// Returns the operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Modify => "modify",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The uniform rejecting default shared by all six operations.
fn reject(operation: Operation) -> BoxFuture<'static, ServiceResult<Value>> {
    Box::pin(async move {
        tracing::debug!(operation = %operation, "operation not overridden, rejecting");
        Err(ServiceError::method_not_allowed(format!(
            "Operation `{operation}` is not supported by this service"
        )))
    })
}

/// The abstract resource service bound to routes by the transport layers.
///
/// Identifiers arrive in raw string form wrapped in `Option`: the
/// [normalizer](crate::normalize_id) collapses the placeholder token to
/// absence, and the service decides what an absent identifier means for
/// each operation (e.g. whether bulk removal is permitted).
///
/// Implementations must be safe to share across concurrent requests; the
/// binding layers hold no lock around operation calls.
pub trait Service: Send + Sync + 'static {
    /// Lists resources. Bound to `GET /`.
    fn index<'a>(&'a self, params: Params) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = params;
        reject(Operation::Index)
    }

    /// Fetches a single resource. Bound to `GET /{id}`.
    fn read<'a>(&'a self, id: Option<Id>, params: Params) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = (id, params);
        reject(Operation::Read)
    }

    /// Creates a resource. Bound to `POST /`.
    fn create<'a>(&'a self, data: Value, params: Params) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = (data, params);
        reject(Operation::Create)
    }

    /// Replaces a resource wholesale. Bound to `PUT /{id}` and `POST /{id}`.
    fn update<'a>(
        &'a self,
        id: Option<Id>,
        data: Value,
        params: Params,
    ) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = (id, data, params);
        reject(Operation::Update)
    }

    /// Partially updates a resource. Bound to `PATCH /{id}`.
    fn modify<'a>(
        &'a self,
        id: Option<Id>,
        data: Value,
        params: Params,
    ) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = (id, data, params);
        reject(Operation::Modify)
    }

    /// Removes a single resource, or the collection when `id` is absent.
    /// Bound to `DELETE /` and `DELETE /{id}`.
    fn remove<'a>(
        &'a self,
        id: Option<Id>,
        params: Params,
    ) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = (id, params);
        reject(Operation::Remove)
    }

    /// Returns the middleware this service declares.
    ///
    /// The default declares nothing. Concrete services build their set once
    /// at construction and return a clone of it here; the transport binders
    /// resolve per-operation chains from it.
    fn middleware(&self) -> MiddlewareSet {
        MiddlewareSet::default()
    }

    /// Called exactly once when a decorating layer wraps this service to
    /// add lifecycle hooks. Default: no-op.
    fn on_wrapped(&self, wrapper: &dyn Service) {
        let _ = wrapper;
    }
}
