//! Middleware declarations and resolution.
//!
//! Middleware here are pre-handler values: each one runs, in declared order,
//! before the bound route handler, and may enrich the per-request transport
//! context (the fragment that wins the parameter merge) or reject the
//! request outright. The chain for an operation is service-level
//! declarations followed by operation-level declarations, concatenated with
//! no reordering and no deduplication.
//!
//! Declarations live in a [`MiddlewareSet`] built once at service
//! construction through [`MiddlewareSet::builder`]; the set replaces the
//! source system's runtime reflection with an explicit registry.

use crate::{BoxFuture, Operation, ServiceResult, ValueMap};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// A pre-handler middleware value.
///
/// Middleware receives the mutable per-request transport context and either
/// completes (letting the chain continue) or fails with a service error that
/// short-circuits the request before the handler runs.
pub trait Middleware: Send + Sync + 'static {
    /// Returns the name of this middleware, used for logging and debugging.
    fn name(&self) -> &str;

    /// Runs this middleware against the per-request transport context.
    fn handle<'a>(&'a self, context: &'a mut ValueMap) -> BoxFuture<'a, ServiceResult<()>>;
}

/// A reference-counted, type-erased middleware.
pub type BoxMiddleware = Arc<dyn Middleware>;

/// A middleware built from a function.
///
/// This allows declaring simple middleware without implementing the trait
/// directly, which keeps caller and fixture code short.
///
/// # Example
///
/// ```
/// use harmonia_core::{FnMiddleware, Middleware, ServiceError, ValueMap};
/// use serde_json::json;
///
/// let auth = FnMiddleware::new("auth", |context: &mut ValueMap| {
///     context.insert("user".to_owned(), json!({"id": 7}));
///     async { Ok::<(), ServiceError>(()) }
/// });
/// assert_eq!(auth.name(), "auth");
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a new function-based middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(&mut ValueMap) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ServiceResult<()>> + Send + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    fn handle<'a>(&'a self, context: &'a mut ValueMap) -> BoxFuture<'a, ServiceResult<()>> {
        Box::pin((self.func)(context))
    }
}

/// The middleware a service declares, service-wide and per operation.
///
/// # Example
///
/// ```
/// use harmonia_core::{FnMiddleware, MiddlewareSet, Operation, ServiceError, ValueMap};
///
/// let noop = |_: &mut ValueMap| async { Ok::<(), ServiceError>(()) };
///
/// let set = MiddlewareSet::builder()
///     .service_level(FnMiddleware::new("logging", noop))
///     .operation(Operation::Create, FnMiddleware::new("quota", noop))
///     .build();
///
/// let names: Vec<_> = set
///     .resolve(Operation::Create)
///     .iter()
///     .map(|m| m.name().to_owned())
///     .collect();
/// assert_eq!(names, vec!["logging", "quota"]);
/// assert_eq!(set.resolve(Operation::Index).len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MiddlewareSet {
    service_level: Vec<BoxMiddleware>,
    operation_level: HashMap<Operation, Vec<BoxMiddleware>>,
}

impl MiddlewareSet {
    /// Creates a new middleware set builder.
    #[must_use]
    pub fn builder() -> MiddlewareSetBuilder {
        MiddlewareSetBuilder::new()
    }

    /// Resolves the declared chain for an operation.
    ///
    /// The result is the service-level declarations followed by the
    /// operation-level declarations, in declaration order, with no
    /// deduplication. An operation with no declarations resolves to an
    /// empty chain, never to an absent one.
    #[must_use]
    pub fn resolve(&self, operation: Operation) -> Vec<BoxMiddleware> {
        let mut chain = self.service_level.clone();
        if let Some(extra) = self.operation_level.get(&operation) {
            chain.extend(extra.iter().cloned());
        }
        chain
    }

    /// Returns `true` if nothing is declared at any level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.service_level.is_empty() && self.operation_level.values().all(Vec::is_empty)
    }
}

impl std::fmt::Debug for MiddlewareSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let service: Vec<_> = self.service_level.iter().map(|m| m.name()).collect();
        f.debug_struct("MiddlewareSet")
            .field("service_level", &service)
            .field("operations", &self.operation_level.len())
            .finish()
    }
}

/// Builder for a [`MiddlewareSet`].
///
/// Declaration order is preserved exactly; it becomes execution order.
#[derive(Default)]
pub struct MiddlewareSetBuilder {
    service_level: Vec<BoxMiddleware>,
    operation_level: HashMap<Operation, Vec<BoxMiddleware>>,
}

impl MiddlewareSetBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a service-level middleware, appended after any previously
    /// declared service-level middleware.
    #[must_use]
    pub fn service_level<M: Middleware>(mut self, middleware: M) -> Self {
        self.service_level.push(Arc::new(middleware));
        self
    }

    /// Declares a middleware for a single operation, appended after any
    /// previously declared middleware for that operation.
    #[must_use]
    pub fn operation<M: Middleware>(mut self, operation: Operation, middleware: M) -> Self {
        self.operation_level
            .entry(operation)
            .or_default()
            .push(Arc::new(middleware));
        self
    }

    /// Builds the set.
    #[must_use]
    pub fn build(self) -> MiddlewareSet {
        MiddlewareSet {
            service_level: self.service_level,
            operation_level: self.operation_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;
    use serde_json::json;

    fn named(name: &'static str) -> impl Middleware {
        FnMiddleware::new(name, |_: &mut ValueMap| async {
            Ok::<(), ServiceError>(())
        })
    }

    fn names(chain: &[BoxMiddleware]) -> Vec<String> {
        chain.iter().map(|m| m.name().to_owned()).collect()
    }

    #[test]
    fn test_empty_set_resolves_to_empty_chains() {
        let set = MiddlewareSet::default();
        assert!(set.is_empty());
        for operation in Operation::ALL {
            assert!(set.resolve(operation).is_empty());
        }
    }

    #[test]
    fn test_service_level_applies_to_every_operation() {
        let set = MiddlewareSet::builder()
            .service_level(named("logging"))
            .build();

        for operation in Operation::ALL {
            assert_eq!(names(&set.resolve(operation)), vec!["logging"]);
        }
    }

    #[test]
    fn test_operation_level_appends_after_service_level() {
        let set = MiddlewareSet::builder()
            .service_level(named("first"))
            .service_level(named("second"))
            .operation(Operation::Remove, named("confirm"))
            .build();

        assert_eq!(
            names(&set.resolve(Operation::Remove)),
            vec!["first", "second", "confirm"]
        );
        assert_eq!(
            names(&set.resolve(Operation::Index)),
            vec!["first", "second"]
        );
    }

    #[test]
    fn test_no_deduplication() {
        let set = MiddlewareSet::builder()
            .service_level(named("throttle"))
            .operation(Operation::Create, named("throttle"))
            .build();

        assert_eq!(
            names(&set.resolve(Operation::Create)),
            vec!["throttle", "throttle"]
        );
    }

    #[tokio::test]
    async fn test_fn_middleware_mutates_context() {
        let middleware = FnMiddleware::new("auth", |context: &mut ValueMap| {
            context.insert("user".to_owned(), json!("alice"));
            async { Ok::<(), ServiceError>(()) }
        });

        let mut context = ValueMap::new();
        middleware
            .handle(&mut context)
            .await
            .expect("middleware should succeed");
        assert_eq!(context.get("user"), Some(&json!("alice")));
    }

    #[tokio::test]
    async fn test_fn_middleware_can_reject() {
        let middleware = FnMiddleware::new("deny", |_: &mut ValueMap| async {
            Err(ServiceError::validation("denied"))
        });

        let mut context = ValueMap::new();
        let error = middleware
            .handle(&mut context)
            .await
            .expect_err("middleware should reject");
        assert_eq!(error.status_code(), http::StatusCode::BAD_REQUEST);
    }
}
