//! The route binder.
//!
//! [`bind`] turns a [`Service`] into the REST route table for one resource.
//! Each of the six operations gets a registration pairing its verb/path
//! bindings with a handler closure; two further registrations pin down the
//! REST surface by rejecting `PUT /` and `PATCH /` unconditionally, so bulk
//! replace and bulk partial update are never routable no matter what the
//! service implements.
//!
//! At request time a handler extracts the transport data, normalizes the
//! identifier, merges the parameter fragments (query, then the REST
//! provider tag, then the transport context, right-biased so the context
//! wins), and delegates to the matching service operation. A successful
//! `create` is mapped to status 201; every other success is 200; errors
//! propagate to the router untouched.

use crate::{BoxHandler, RouteKind, RoutePath, RouteRegistration, RouteRequest, RouteResponse, RouteSet};
use harmonia_core::{
    normalize_id, BoxMiddleware, Fragment, Operation, Params, Provider, Service, ServiceError,
};
use http::Method;
use serde_json::Value;
use std::sync::Arc;

/// Generates the REST route table for a service instance.
///
/// `extra` is the caller-supplied middleware (e.g. authentication handlers)
/// that runs before everything the service declares; the resolved chain for
/// each operation is `extra` ++ service-level ++ operation-level, in that
/// order, with no deduplication.
///
/// Exactly 8 registrations are produced for every service, regardless of
/// which operations it overrides:
///
/// | Operation | Bindings |
/// |---|---|
/// | `index` | `GET /` |
/// | `read` | `GET /{id}` |
/// | `create` | `POST /` |
/// | `update` | `PUT /{id}`, `POST /{id}` |
/// | `modify` | `PATCH /{id}` |
/// | `remove` | `DELETE /`, `DELETE /{id}` |
/// | (rejected) | `PUT /` |
/// | (rejected) | `PATCH /` |
///
/// The binder holds no state between calls: binding the same service twice
/// yields two independent route tables.
///
/// # Example
///
/// ```
/// use harmonia_core::fixtures::MemoryService;
/// use harmonia_rest::bind;
/// use std::sync::Arc;
///
/// let routes = bind(&(Arc::new(MemoryService::new()) as Arc<dyn harmonia_core::Service>), &[]);
/// assert_eq!(routes.len(), 8);
/// ```
#[must_use]
pub fn bind(service: &Arc<dyn Service>, extra: &[BoxMiddleware]) -> RouteSet {
    let declared = service.middleware();
    let mut routes = Vec::with_capacity(8);

    for operation in Operation::ALL {
        let chain: Vec<BoxMiddleware> = extra
            .iter()
            .cloned()
            .chain(declared.resolve(operation))
            .collect();

        tracing::debug!(
            operation = %operation,
            middleware = chain.len(),
            "registering resource route"
        );

        routes.push(RouteRegistration::new(
            RouteKind::Operation(operation),
            bindings_for(operation),
            operation_handler(Arc::clone(service), operation),
            chain,
        ));
    }

    // The REST surface is unambiguous: bulk replace and bulk partial update
    // are never routable, independent of what the service overrides.
    for method in [Method::PUT, Method::PATCH] {
        routes.push(RouteRegistration::new(
            RouteKind::Rejected,
            vec![(method, RoutePath::Root)],
            rejected_handler(),
            Vec::new(),
        ));
    }

    RouteSet::new(routes)
}

/// The fixed verb/path bindings for an operation.
fn bindings_for(operation: Operation) -> Vec<(Method, RoutePath)> {
    match operation {
        Operation::Index => vec![(Method::GET, RoutePath::Root)],
        Operation::Read => vec![(Method::GET, RoutePath::Id)],
        Operation::Create => vec![(Method::POST, RoutePath::Root)],
        Operation::Update => vec![(Method::PUT, RoutePath::Id), (Method::POST, RoutePath::Id)],
        Operation::Modify => vec![(Method::PATCH, RoutePath::Id)],
        Operation::Remove => vec![
            (Method::DELETE, RoutePath::Root),
            (Method::DELETE, RoutePath::Id),
        ],
    }
}

/// Builds the request-time handler closure for one operation.
fn operation_handler(service: Arc<dyn Service>, operation: Operation) -> BoxHandler {
    Arc::new(move |request: RouteRequest| {
        let service = Arc::clone(&service);
        Box::pin(async move {
            let RouteRequest {
                id,
                query,
                body,
                context,
            } = request;

            let id = normalize_id(id.as_deref());
            let params = Params::merge([
                Fragment::Query(query),
                Fragment::Provider(Provider::Rest),
                Fragment::Context(context),
            ]);
            let data = body.unwrap_or(Value::Null);

            tracing::trace!(operation = %operation, id = ?id, "dispatching service call");

            let value = match operation {
                Operation::Index => service.index(params).await?,
                Operation::Read => service.read(id, params).await?,
                Operation::Create => {
                    // The one response-side effect: a successful create
                    // signals "created" to the transport.
                    let created = service.create(data, params).await?;
                    return Ok(RouteResponse::created(created));
                }
                Operation::Update => service.update(id, data, params).await?,
                Operation::Modify => service.modify(id, data, params).await?,
                Operation::Remove => service.remove(id, params).await?,
            };

            Ok(RouteResponse::ok(value))
        })
    })
}

/// The handler behind the two compliance registrations.
fn rejected_handler() -> BoxHandler {
    Arc::new(|_request: RouteRequest| {
        Box::pin(async {
            Err(ServiceError::not_found(
                "Bulk replace and bulk partial update are not routable",
            ))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonia_core::fixtures::{MemoryService, NoopService};
    use http::StatusCode;
    use serde_json::json;

    fn routes_for(service: impl Service) -> RouteSet {
        bind(&(Arc::new(service) as Arc<dyn Service>), &[])
    }

    #[test]
    fn test_always_eight_registrations() {
        assert_eq!(routes_for(NoopService).len(), 8);
        assert_eq!(routes_for(MemoryService::new()).len(), 8);
    }

    #[test]
    fn test_route_table_shape() {
        let routes = routes_for(NoopService);

        let expect = |operation: Operation, bindings: &[(Method, RoutePath)]| {
            let registration = routes
                .operation(operation)
                .expect("every operation should be registered");
            assert_eq!(registration.bindings(), bindings);
        };

        expect(Operation::Index, &[(Method::GET, RoutePath::Root)]);
        expect(Operation::Read, &[(Method::GET, RoutePath::Id)]);
        expect(Operation::Create, &[(Method::POST, RoutePath::Root)]);
        expect(
            Operation::Update,
            &[(Method::PUT, RoutePath::Id), (Method::POST, RoutePath::Id)],
        );
        expect(Operation::Modify, &[(Method::PATCH, RoutePath::Id)]);
        expect(
            Operation::Remove,
            &[
                (Method::DELETE, RoutePath::Root),
                (Method::DELETE, RoutePath::Id),
            ],
        );

        let rejected: Vec<_> = routes
            .routes()
            .iter()
            .filter(|route| route.kind() == RouteKind::Rejected)
            .collect();
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].bindings(), &[(Method::PUT, RoutePath::Root)]);
        assert_eq!(rejected[1].bindings(), &[(Method::PATCH, RoutePath::Root)]);
    }

    #[test]
    fn test_bind_is_stateless_across_calls() {
        let service: Arc<dyn Service> = Arc::new(MemoryService::new());
        let first = bind(&service, &[]);
        let second = bind(&service, &[]);
        assert_eq!(first.len(), 8);
        assert_eq!(second.len(), 8);
    }

    #[tokio::test]
    async fn test_create_maps_to_created_status() {
        let routes = routes_for(MemoryService::new());
        let response = routes
            .dispatch(
                Method::POST,
                RoutePath::Root,
                RouteRequest::new().with_body(json!({"id": "1", "name": "Ada"})),
            )
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, json!({"id": "1", "name": "Ada"}));
    }

    #[tokio::test]
    async fn test_placeholder_id_reaches_service_as_absent() {
        // DELETE /null is bulk removal: the placeholder collapses before
        // the service sees it.
        let routes = routes_for(
            MemoryService::new()
                .with_record("1", json!({"id": "1"}))
                .with_record("2", json!({"id": "2"})),
        );

        let response = routes
            .dispatch(
                Method::DELETE,
                RoutePath::Id,
                RouteRequest::new().with_id("null"),
            )
            .await
            .unwrap();
        assert_eq!(response.body, json!([{"id": "1"}, {"id": "2"}]));
    }

    #[tokio::test]
    async fn test_provider_is_stamped_rest() {
        struct Probe;

        impl Service for Probe {
            fn index<'a>(
                &'a self,
                params: Params,
            ) -> harmonia_core::BoxFuture<'a, harmonia_core::ServiceResult<Value>> {
                Box::pin(async move {
                    Ok(json!(params
                        .provider()
                        .map(|provider| provider.as_str().to_owned())))
                })
            }
        }

        let routes = routes_for(Probe);
        let response = routes
            .dispatch(Method::GET, RoutePath::Root, RouteRequest::new())
            .await
            .unwrap();
        assert_eq!(response.body, json!("rest"));
    }

    #[tokio::test]
    async fn test_missing_body_dispatches_null() {
        struct Probe;

        impl Service for Probe {
            fn create<'a>(
                &'a self,
                data: Value,
                _params: Params,
            ) -> harmonia_core::BoxFuture<'a, harmonia_core::ServiceResult<Value>> {
                Box::pin(async move { Ok(json!({"received_null": data.is_null()})) })
            }
        }

        let routes = routes_for(Probe);
        let response = routes
            .dispatch(Method::POST, RoutePath::Root, RouteRequest::new())
            .await
            .unwrap();
        assert_eq!(response.body, json!({"received_null": true}));
    }
}
