//! Per-request parameter assembly.
//!
//! Every service operation receives a single [`Params`] value assembled from
//! the fragments the transport layer produced for the request: the parsed
//! query string, the transport's [`Provider`] tag, and the per-request
//! service context (which may carry authentication or session data).
//!
//! The merge is right-biased and shallow: for each key, the last fragment
//! that defines it wins, and nested mappings are replaced wholesale rather
//! than deep-merged. This is a deliberate, stable policy that alternate
//! transports rely on.

use crate::Provider;
use indexmap::IndexMap;
use serde_json::Value;

/// A raw string-keyed mapping, ordered by insertion.
pub type ValueMap = IndexMap<String, Value>;

/// One input to the parameter merge.
///
/// The fragment kinds are closed: transports produce exactly these three,
/// in this order, for a REST request. Each kind expands to the key/value
/// entries it contributes to the merged result.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// The parsed query string, nested under the `query` key.
    Query(ValueMap),
    /// The transport tag, stored under the `provider` key.
    Provider(Provider),
    /// The per-request context supplied by the transport layer, merged
    /// entry by entry at the top level.
    Context(ValueMap),
}

impl Fragment {
    /// Expands this fragment into the entries it contributes.
    fn into_entries(self) -> ValueMap {
        match self {
            Self::Query(map) => {
                let mut entries = ValueMap::with_capacity(1);
                entries.insert(
                    "query".to_owned(),
                    Value::Object(map.into_iter().collect()),
                );
                entries
            }
            Self::Provider(provider) => {
                let mut entries = ValueMap::with_capacity(1);
                entries.insert(
                    "provider".to_owned(),
                    Value::String(provider.as_str().to_owned()),
                );
                entries
            }
            Self::Context(map) => map,
        }
    }
}

/// The merged parameters handed to a service operation.
///
/// Created fresh per request, passed by value into the service call, and
/// discarded after the call returns. Reserved query keys (`$limit`, `$sort`,
/// `page`, `token`) are surfaced as ordinary entries of the `query` mapping;
/// interpreting them is the concrete service's business.
///
/// # Example
///
/// ```
/// use harmonia_core::{Fragment, Params, Provider, ValueMap};
/// use serde_json::json;
///
/// let mut query = ValueMap::new();
/// query.insert("$limit".to_owned(), json!("10"));
///
/// let mut context = ValueMap::new();
/// context.insert("user".to_owned(), json!({"id": 7}));
///
/// let params = Params::merge([
///     Fragment::Query(query),
///     Fragment::Provider(Provider::Rest),
///     Fragment::Context(context),
/// ]);
///
/// assert_eq!(params.provider(), Some(Provider::Rest));
/// assert_eq!(params.query().unwrap()["$limit"], json!("10"));
/// assert_eq!(params.get("user"), Some(&json!({"id": 7})));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    inner: ValueMap,
}

impl Params {
    /// Creates an empty parameters value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges fragments left to right into a single parameters value.
    ///
    /// For each key present in a later fragment, its value replaces any
    /// prior value for that key; keys absent from later fragments keep
    /// their earlier values; the result is the union of all keys. The
    /// replacement is non-recursive. Total for all well-formed inputs.
    #[must_use]
    pub fn merge(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let mut inner = ValueMap::new();
        for fragment in fragments {
            for (key, value) in fragment.into_entries() {
                inner.insert(key, value);
            }
        }
        Self { inner }
    }

    /// Returns the value for a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Inserts or replaces a top-level entry.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.inner.insert(key.into(), value);
    }

    /// Returns the `query` mapping, if the merge produced one.
    #[must_use]
    pub fn query(&self) -> Option<&serde_json::Map<String, Value>> {
        self.inner.get("query").and_then(Value::as_object)
    }

    /// Returns the provider tag, if one was stamped and is known.
    ///
    /// Server-initiated calls stamp no provider; this returns `None` for
    /// those and for foreign tags, never an error.
    #[must_use]
    pub fn provider(&self) -> Option<Provider> {
        self.inner
            .get("provider")
            .and_then(Value::as_str)
            .and_then(Provider::from_via)
    }

    /// Returns `true` if no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the top-level entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}
