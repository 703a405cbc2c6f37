//! Transport provider tags.
//!
//! A [`Provider`] identifies the transport through which a request reached a
//! service. It is stamped into the merged [`Params`](crate::Params) value so
//! an operation can introspect how it was invoked. Server-initiated calls
//! carry no provider at all; consumers must treat that case as an unknown
//! transport, never as an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The transport a request arrived through.
///
/// Providers are process-wide constants. They are compared by value and are
/// never mutated after construction.
///
/// # Example
///
/// ```
/// use harmonia_core::Provider;
///
/// assert_eq!(Provider::Rest.as_str(), "rest");
/// assert_eq!(Provider::from_via("socket"), Some(Provider::Socket));
/// assert_eq!(Provider::from_via("carrier-pigeon"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Plain HTTP REST transport.
    Rest,
    /// Socket-based realtime transport.
    Socket,
    /// Query-language transport (e.g. a GraphQL-style gateway).
    QueryLang,
}

impl Provider {
    /// Returns the wire name of this provider.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Socket => "socket",
            Self::QueryLang => "querylang",
        }
    }

    /// Looks a provider up by its wire name.
    ///
    /// Returns `None` for unknown names so callers can treat foreign
    /// transports as "unknown" rather than failing.
    #[must_use]
    pub fn from_via(via: &str) -> Option<Self> {
        match via {
            "rest" => Some(Self::Rest),
            "socket" => Some(Self::Socket),
            "querylang" => Some(Self::QueryLang),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_wire_names() {
        assert_eq!(Provider::Rest.as_str(), "rest");
        assert_eq!(Provider::Socket.as_str(), "socket");
        assert_eq!(Provider::QueryLang.as_str(), "querylang");
    }

    #[test]
    fn test_provider_round_trip() {
        for provider in [Provider::Rest, Provider::Socket, Provider::QueryLang] {
            assert_eq!(Provider::from_via(provider.as_str()), Some(provider));
        }
    }

    #[test]
    fn test_provider_unknown_via() {
        assert_eq!(Provider::from_via("grpc"), None);
        assert_eq!(Provider::from_via(""), None);
        assert_eq!(Provider::from_via("REST"), None);
    }

    #[test]
    fn test_provider_equality_is_by_value() {
        assert_eq!(Provider::Rest, Provider::Rest);
        assert_ne!(Provider::Rest, Provider::Socket);
    }

    #[test]
    fn test_provider_serde() {
        let json = serde_json::to_string(&Provider::QueryLang).expect("serialization should work");
        assert_eq!(json, "\"querylang\"");

        let parsed: Provider = serde_json::from_str("\"rest\"").expect("deserialization should work");
        assert_eq!(parsed, Provider::Rest);
    }

    #[test]
    fn test_provider_display() {
        assert_eq!(Provider::Socket.to_string(), "socket");
    }
}
