//! The modeled transport boundary.
//!
//! The HTTP server and router are external collaborators; this module
//! models exactly what they exchange with a bound route handler. Inbound, a
//! [`RouteRequest`] snapshots the data the router extracted for a matched
//! route. Outbound, a [`RouteResponse`] carries the status and JSON body
//! the router will render.

use harmonia_core::ValueMap;
use http::StatusCode;
use serde_json::Value;

/// What the external router hands a bound route handler for one request.
///
/// All fields are materialized fresh per request; nothing here is shared
/// across requests.
///
/// # Example
///
/// ```
/// use harmonia_rest::RouteRequest;
/// use serde_json::json;
///
/// let request = RouteRequest::new()
///     .with_id("42")
///     .with_query("$limit", json!("10"))
///     .with_context("user", json!({"id": 7}));
///
/// assert_eq!(request.id.as_deref(), Some("42"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// The raw id path segment, when the matched path carries one.
    pub id: Option<String>,
    /// The parsed query-string mapping.
    pub query: ValueMap,
    /// The parsed JSON body, when the transport provided one. Handlers for
    /// data-carrying operations read it lazily at dispatch time.
    pub body: Option<Value>,
    /// The per-request service context produced by the transport layer
    /// (may carry authentication or session data).
    pub context: ValueMap,
}

impl RouteRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw id path segment.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a query-string entry.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: Value) -> Self {
        self.query.insert(key.into(), value);
        self
    }

    /// Sets the parsed request body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a transport context entry.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }
}

/// What a bound route handler returns to the external router.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    /// The HTTP status the router should render.
    pub status: StatusCode,
    /// The JSON body.
    pub body: Value,
}

impl RouteResponse {
    /// A plain 200 response.
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// A 201 response, used for successful `create` calls.
    #[must_use]
    pub fn created(body: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builders() {
        let request = RouteRequest::new()
            .with_id("5")
            .with_query("page", json!("2"))
            .with_body(json!({"name": "Ada"}))
            .with_context("authenticated", json!(true));

        assert_eq!(request.id.as_deref(), Some("5"));
        assert_eq!(request.query.get("page"), Some(&json!("2")));
        assert_eq!(request.body, Some(json!({"name": "Ada"})));
        assert_eq!(request.context.get("authenticated"), Some(&json!(true)));
    }

    #[test]
    fn test_empty_request() {
        let request = RouteRequest::new();
        assert_eq!(request.id, None);
        assert!(request.query.is_empty());
        assert_eq!(request.body, None);
        assert!(request.context.is_empty());
    }

    #[test]
    fn test_response_constructors() {
        assert_eq!(RouteResponse::ok(json!([])).status, StatusCode::OK);
        assert_eq!(
            RouteResponse::created(json!({"id": "1"})).status,
            StatusCode::CREATED
        );
    }
}
