//! Test fixtures for Harmonia development and testing.
//!
//! This module provides pre-built concrete services that can be used in
//! tests across the Harmonia codebase.
//!
//! # Example
//!
//! ```
//! use harmonia_core::fixtures::MemoryService;
//! use harmonia_core::{Params, Service};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let service = MemoryService::new().with_record("1", json!({"id": "1", "name": "Ada"}));
//! let listing = service.index(Params::new()).await.unwrap();
//! assert_eq!(listing, json!([{"id": "1", "name": "Ada"}]));
//! # });
//! ```

use crate::{
    BoxFuture, Id, MiddlewareSet, Params, Service, ServiceError, ServiceResult,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// A service overriding no operations; every call rejects with 405.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopService;

impl Service for NoopService {}

/// An in-memory concrete service implementing all six operations.
///
/// Records are keyed by their string identifier. `index` honours the
/// reserved `$limit` query key; `remove` permits bulk removal (clearing the
/// store and returning the removed records). Intended for tests, not
/// production storage.
#[derive(Debug, Default)]
pub struct MemoryService {
    store: Mutex<IndexMap<String, Value>>,
    next_id: AtomicU64,
    middleware: MiddlewareSet,
    wrapped: AtomicU64,
}

impl MemoryService {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record, replacing any existing record with the same id.
    #[must_use]
    pub fn with_record(self, id: impl Into<String>, value: Value) -> Self {
        self.lock().insert(id.into(), value);
        self
    }

    /// Attaches declared middleware to this service.
    #[must_use]
    pub fn with_middleware(mut self, middleware: MiddlewareSet) -> Self {
        self.middleware = middleware;
        self
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns how many times a decorating layer announced itself via
    /// [`Service::on_wrapped`].
    #[must_use]
    pub fn wrapped_count(&self) -> u64 {
        self.wrapped.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, Value>> {
        self.store.lock().expect("fixture store lock poisoned")
    }

    /// Reads `$limit` from the query mapping, accepting numeric or string
    /// form; anything else is a validation error.
    fn limit(params: &Params) -> ServiceResult<Option<usize>> {
        let Some(raw) = params.query().and_then(|query| query.get("$limit")) else {
            return Ok(None);
        };

        let parsed = match raw {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };

        parsed
            .map(|limit| Some(usize::try_from(limit).unwrap_or(usize::MAX)))
            .ok_or_else(|| ServiceError::validation("`$limit` must be a non-negative integer"))
    }

    /// Derives the storage key for a new record, preferring an explicit
    /// `id` field over the internal counter.
    fn key_for(&self, data: &Value) -> String {
        match data.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => self.next_id.fetch_add(1, Ordering::SeqCst).to_string(),
        }
    }
}

impl Service for MemoryService {
    fn index<'a>(&'a self, params: Params) -> BoxFuture<'a, ServiceResult<Value>> {
        Box::pin(async move {
            let limit = Self::limit(&params)?;
            let mut records: Vec<Value> = self.lock().values().cloned().collect();
            if let Some(limit) = limit {
                records.truncate(limit);
            }
            Ok(Value::Array(records))
        })
    }

    fn read<'a>(&'a self, id: Option<Id>, params: Params) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = params;
        Box::pin(async move {
            let id = id.ok_or_else(|| ServiceError::validation("`read` requires an identifier"))?;
            self.lock()
                .get(&id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found(format!("No record with id '{id}'")))
        })
    }

    fn create<'a>(&'a self, data: Value, params: Params) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = params;
        Box::pin(async move {
            if !data.is_object() {
                return Err(ServiceError::validation("`create` expects an object body"));
            }

            let key = self.key_for(&data);
            let mut record = data;
            if record.get("id").is_none() {
                record["id"] = Value::String(key.clone());
            }

            let mut store = self.lock();
            if store.contains_key(&key) {
                return Err(ServiceError::conflict(format!(
                    "A record with id '{key}' already exists"
                )));
            }
            store.insert(key, record.clone());
            Ok(record)
        })
    }

    fn update<'a>(
        &'a self,
        id: Option<Id>,
        data: Value,
        params: Params,
    ) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = params;
        Box::pin(async move {
            let id =
                id.ok_or_else(|| ServiceError::validation("`update` requires an identifier"))?;
            if !data.is_object() {
                return Err(ServiceError::validation("`update` expects an object body"));
            }
            let mut store = self.lock();
            if !store.contains_key(&id) {
                return Err(ServiceError::not_found(format!("No record with id '{id}'")));
            }

            let mut record = data;
            record["id"] = Value::String(id.clone());
            store.insert(id, record.clone());
            Ok(record)
        })
    }

    fn modify<'a>(
        &'a self,
        id: Option<Id>,
        data: Value,
        params: Params,
    ) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = params;
        Box::pin(async move {
            let id =
                id.ok_or_else(|| ServiceError::validation("`modify` requires an identifier"))?;
            let Some(patch) = data.as_object() else {
                return Err(ServiceError::validation("`modify` expects an object body"));
            };

            let mut store = self.lock();
            let record = store
                .get_mut(&id)
                .ok_or_else(|| ServiceError::not_found(format!("No record with id '{id}'")))?;

            if let Some(fields) = record.as_object_mut() {
                for (key, value) in patch {
                    fields.insert(key.clone(), value.clone());
                }
            }
            Ok(record.clone())
        })
    }

    fn remove<'a>(&'a self, id: Option<Id>, params: Params) -> BoxFuture<'a, ServiceResult<Value>> {
        let _ = params;
        Box::pin(async move {
            let mut store = self.lock();
            match id {
                Some(id) => store
                    .shift_remove(&id)
                    .ok_or_else(|| ServiceError::not_found(format!("No record with id '{id}'"))),
                // Bulk removal is permitted here; the whole collection goes.
                None => {
                    let removed: Vec<Value> = store.drain(..).map(|(_, value)| value).collect();
                    Ok(Value::Array(removed))
                }
            }
        })
    }

    fn middleware(&self) -> MiddlewareSet {
        self.middleware.clone()
    }

    fn on_wrapped(&self, _wrapper: &dyn Service) {
        self.wrapped.fetch_add(1, Ordering::SeqCst);
    }
}
