//! In-process document store.
//!
//! Backs tests and single-process deployments. Update semantics follow the
//! managed store it stands in for: unions skip values already present,
//! removals drop every instance and updates on missing documents fail.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::trace;
use ulid::Ulid;

use super::{Document, DocumentStore, Filter, StoreError, StoreResult, StoredDocument};

#[derive(Debug)]
struct Entry {
    seq: u64,
    data: Document,
}

#[derive(Debug, Default)]
struct Collections {
    next_seq: u64,
    by_name: HashMap<String, HashMap<String, Entry>>,
}

impl Collections {
    fn insert(&mut self, collection: &str, id: String, data: Document) {
        let seq = self.next_seq;
        self.next_seq += 1;

        let docs = self.by_name.entry(collection.to_string()).or_default();
        match docs.get_mut(&id) {
            // Overwrites keep their original position.
            Some(existing) => existing.data = data,
            None => {
                docs.insert(id, Entry { seq, data });
            }
        }
    }

    fn doc_mut(&mut self, collection: &str, id: &str) -> StoreResult<&mut Document> {
        self.by_name
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .map(|entry| &mut entry.data)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }
}

/// Document store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.inner
            .read()
            .by_name
            .get(collection)
            .map_or(0, HashMap::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

fn array_field<'a>(data: &'a mut Document, field: &str) -> &'a mut Vec<Value> {
    let slot = data
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot was just made an array"),
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn add(&self, collection: &str, data: Document) -> StoreResult<String> {
        let id = Ulid::new().to_string();
        self.inner.write().insert(collection, id.clone(), data);
        trace!(collection, id = %id, "document added");
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Document) -> StoreResult<()> {
        self.inner.write().insert(collection, id.to_string(), data);
        trace!(collection, id, "document set");
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        let guard = self.inner.read();
        Ok(guard
            .by_name
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|entry| StoredDocument {
                id: id.to_string(),
                data: entry.data.clone(),
            }))
    }

    async fn query(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> StoreResult<Vec<StoredDocument>> {
        let guard = self.inner.read();
        let Some(docs) = guard.by_name.get(collection) else {
            return Ok(Vec::new());
        };

        let mut hits: Vec<(&String, &Entry)> = docs
            .iter()
            .filter(|(_, entry)| filter.map_or(true, |f| f.matches(&entry.data)))
            .collect();
        hits.sort_by_key(|(_, entry)| entry.seq);

        Ok(hits
            .into_iter()
            .map(|(id, entry)| StoredDocument {
                id: id.clone(),
                data: entry.data.clone(),
            })
            .collect())
    }

    async fn array_union(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> StoreResult<()> {
        let mut guard = self.inner.write();
        let items = array_field(guard.doc_mut(collection, id)?, field);
        for value in values {
            if !items.contains(&value) {
                items.push(value);
            }
        }
        Ok(())
    }

    async fn array_remove(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> StoreResult<()> {
        let mut guard = self.inner.write();
        let items = array_field(guard.doc_mut(collection, id)?, field);
        items.retain(|item| !values.contains(item));
        Ok(())
    }

    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> StoreResult<()> {
        let mut guard = self.inner.write();
        let data = guard.doc_mut(collection, id)?;
        let current = data.get(field).and_then(Value::as_i64).unwrap_or(0);
        data.insert(field.to_string(), Value::from(current.saturating_add(delta)));
        Ok(())
    }
}
