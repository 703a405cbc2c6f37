//! Route registrations and the dispatch table.
//!
//! The route binder produces [`RouteRegistration`] values; an external
//! router owns them from then on. Because that router is out of scope, this
//! module also provides [`RouteSet`], a dispatch table that plays the
//! router's role: match a request to the first registration that accepts
//! its verb and path shape, run the registration's middleware chain in
//! order, then invoke the bound handler. Cancellation, timeouts, and error
//! rendering remain the embedding router's concern.

use crate::{RouteRequest, RouteResponse};
use harmonia_core::{BoxFuture, BoxMiddleware, Operation, ServiceError, ServiceResult};
use http::Method;
use std::sync::Arc;

/// The path shape a route binds to.
///
/// A resource exposes exactly two path shapes: the collection root and the
/// single-resource path with an id segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutePath {
    /// The collection root, `/`.
    Root,
    /// The single-resource path, `/{id}`.
    Id,
}

impl RoutePath {
    /// Returns the path template for this shape.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Id => "/{id}",
        }
    }
}

/// What a registration routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// A CRUD operation on the bound service.
    Operation(Operation),
    /// A fixed compliance route that always rejects with "not found".
    Rejected,
}

/// A bound, type-erased route handler.
pub type BoxHandler =
    Arc<dyn Fn(RouteRequest) -> BoxFuture<'static, ServiceResult<RouteResponse>> + Send + Sync>;

/// One entry the binder hands to the external router.
///
/// A registration couples its verb/path bindings with the bound handler and
/// the resolved middleware chain. It is immutable once produced.
pub struct RouteRegistration {
    kind: RouteKind,
    bindings: Vec<(Method, RoutePath)>,
    handler: BoxHandler,
    middleware: Vec<BoxMiddleware>,
}

impl RouteRegistration {
    /// Creates a registration.
    #[must_use]
    pub fn new(
        kind: RouteKind,
        bindings: Vec<(Method, RoutePath)>,
        handler: BoxHandler,
        middleware: Vec<BoxMiddleware>,
    ) -> Self {
        Self {
            kind,
            bindings,
            handler,
            middleware,
        }
    }

    /// Returns what this registration routes to.
    #[must_use]
    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    /// Returns the verb/path bindings, in registration order.
    #[must_use]
    pub fn bindings(&self) -> &[(Method, RoutePath)] {
        &self.bindings
    }

    /// Returns the middleware chain, in execution order.
    #[must_use]
    pub fn middleware(&self) -> &[BoxMiddleware] {
        &self.middleware
    }

    /// Returns `true` if this registration accepts the verb and path shape.
    #[must_use]
    pub fn matches(&self, method: &Method, path: RoutePath) -> bool {
        self.bindings
            .iter()
            .any(|(bound_method, bound_path)| bound_method == method && *bound_path == path)
    }

    /// Runs the middleware chain, then the bound handler.
    ///
    /// Middleware executes strictly in chain order before the handler; the
    /// first failure short-circuits the request and the handler never runs.
    pub async fn handle(&self, mut request: RouteRequest) -> ServiceResult<RouteResponse> {
        for middleware in &self.middleware {
            tracing::trace!(middleware = middleware.name(), "running route middleware");
            middleware.handle(&mut request.context).await?;
        }
        (self.handler)(request).await
    }
}

impl std::fmt::Debug for RouteRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let middleware: Vec<_> = self.middleware.iter().map(|m| m.name()).collect();
        f.debug_struct("RouteRegistration")
            .field("kind", &self.kind)
            .field("bindings", &self.bindings)
            .field("middleware", &middleware)
            .finish_non_exhaustive()
    }
}

/// The route table produced by one `bind` call.
///
/// Matching is first-match in registration order, which is deterministic
/// because the binder emits registrations in a fixed order.
#[derive(Debug)]
pub struct RouteSet {
    routes: Vec<RouteRegistration>,
}

impl RouteSet {
    /// Creates a route set from registrations.
    #[must_use]
    pub fn new(routes: Vec<RouteRegistration>) -> Self {
        Self { routes }
    }

    /// Returns the registrations, in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteRegistration] {
        &self.routes
    }

    /// Returns the number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the registration for a CRUD operation, if present.
    #[must_use]
    pub fn operation(&self, operation: Operation) -> Option<&RouteRegistration> {
        self.routes
            .iter()
            .find(|route| route.kind() == RouteKind::Operation(operation))
    }

    /// Dispatches a request the way the external router would.
    ///
    /// Errors from middleware and handlers propagate unchanged; an
    /// unroutable verb/path pair fails with "not found".
    pub async fn dispatch(
        &self,
        method: Method,
        path: RoutePath,
        request: RouteRequest,
    ) -> ServiceResult<RouteResponse> {
        let Some(route) = self.routes.iter().find(|route| route.matches(&method, path)) else {
            return Err(ServiceError::not_found(format!(
                "No route for {method} {}",
                path.template()
            )));
        };

        tracing::debug!(%method, path = path.template(), kind = ?route.kind(), "dispatching route");
        route.handle(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok_handler() -> BoxHandler {
        Arc::new(|_request| Box::pin(async { Ok(RouteResponse::ok(json!("handled"))) }))
    }

    #[test]
    fn test_path_templates() {
        assert_eq!(RoutePath::Root.template(), "/");
        assert_eq!(RoutePath::Id.template(), "/{id}");
    }

    #[test]
    fn test_registration_matching() {
        let registration = RouteRegistration::new(
            RouteKind::Operation(Operation::Update),
            vec![(Method::PUT, RoutePath::Id), (Method::POST, RoutePath::Id)],
            ok_handler(),
            Vec::new(),
        );

        assert!(registration.matches(&Method::PUT, RoutePath::Id));
        assert!(registration.matches(&Method::POST, RoutePath::Id));
        assert!(!registration.matches(&Method::PUT, RoutePath::Root));
        assert!(!registration.matches(&Method::GET, RoutePath::Id));
    }

    #[tokio::test]
    async fn test_dispatch_unroutable_is_not_found() {
        let set = RouteSet::new(Vec::new());
        let error = set
            .dispatch(Method::GET, RoutePath::Root, RouteRequest::new())
            .await
            .expect_err("empty set should not route anything");
        assert_eq!(error.status_code(), http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dispatch_first_match_wins() {
        let first = RouteRegistration::new(
            RouteKind::Operation(Operation::Index),
            vec![(Method::GET, RoutePath::Root)],
            Arc::new(|_request| Box::pin(async { Ok(RouteResponse::ok(json!("first"))) })),
            Vec::new(),
        );
        let second = RouteRegistration::new(
            RouteKind::Operation(Operation::Index),
            vec![(Method::GET, RoutePath::Root)],
            Arc::new(|_request| Box::pin(async { Ok(RouteResponse::ok(json!("second"))) })),
            Vec::new(),
        );

        let set = RouteSet::new(vec![first, second]);
        let response = set
            .dispatch(Method::GET, RoutePath::Root, RouteRequest::new())
            .await
            .unwrap();
        assert_eq!(response.body, json!("first"));
    }
}
