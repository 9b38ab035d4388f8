//! Document-store abstraction consumed by the repositories.
//!
//! A store holds named collections of JSON-object documents. Repositories
//! only ever use the primitives on [`DocumentStore`]; there are no
//! transactions, batches or live listeners.

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod memory;

pub use memory::InMemoryStore;

/// Field map of a single document.
pub type Document = Map<String, Value>;

/// A document together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

impl StoredDocument {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

/// Query predicates supported by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `field == value`
    Eq { field: String, value: Value },
    /// `value` is an element of the array held in `field`
    ArrayContains { field: String, value: Value },
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayContains {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, data: &Document) -> bool {
        match self {
            Filter::Eq { field, value } => data.get(field) == Some(value),
            Filter::ArrayContains { field, value } => data
                .get(field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.contains(value)),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("document {collection}/{id} does not exist")]
    NotFound { collection: String, id: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("corrupt document: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote document database primitives.
///
/// Updates (`array_union`, `array_remove`, `increment`) fail with
/// [`StoreError::NotFound`] when the document does not exist.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Create a document with a store-generated id.
    async fn add(&self, collection: &str, data: Document) -> StoreResult<String>;

    /// Create or overwrite the document at `id`.
    async fn set(&self, collection: &str, id: &str, data: Document) -> StoreResult<()>;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>>;

    /// Documents matching `filter` (all documents when `None`), in creation order.
    async fn query(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> StoreResult<Vec<StoredDocument>>;

    /// Append each value not already present in the array at `field`.
    async fn array_union(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> StoreResult<()>;

    /// Remove every instance of each value from the array at `field`.
    async fn array_remove(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> StoreResult<()>;

    /// Add `delta` to the number at `field`, treating a missing field as 0.
    async fn increment(&self, collection: &str, id: &str, field: &str, delta: i64)
        -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test documents are objects"),
        }
    }

    #[test]
    fn eq_filter_compares_whole_value() {
        let data = doc(json!({ "hash": "abc", "score": 5 }));
        assert!(Filter::eq("hash", "abc").matches(&data));
        assert!(!Filter::eq("hash", "abd").matches(&data));
        assert!(!Filter::eq("missing", "abc").matches(&data));
    }

    #[test]
    fn array_contains_requires_array_field() {
        let data = doc(json!({ "playerIds": ["p1", "p2"], "hash": "p1" }));
        assert!(Filter::array_contains("playerIds", "p2").matches(&data));
        assert!(!Filter::array_contains("playerIds", "p3").matches(&data));
        assert!(!Filter::array_contains("hash", "p1").matches(&data));
    }
}
