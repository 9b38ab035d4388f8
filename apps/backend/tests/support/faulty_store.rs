//! Document store wrapper that injects failures and latency.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use qrhunter::infra::store::{
    Document, DocumentStore, Filter, InMemoryStore, StoreError, StoreResult, StoredDocument,
};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Set,
    Get,
    Query,
    ArrayUnion,
    ArrayRemove,
    Increment,
}

#[derive(Debug, Default)]
pub struct FaultyStore {
    inner: InMemoryStore,
    failures: Mutex<HashMap<(Op, String), StoreError>>,
    calls: Mutex<HashMap<(Op, String), usize>>,
    query_delay: Mutex<Option<Duration>>,
    array_write_delay: Mutex<Option<Duration>>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `op` on `collection` fail with `err` until healed.
    pub fn fail_on(&self, op: Op, collection: &str, err: StoreError) {
        self.failures.lock().insert((op, collection.to_string()), err);
    }

    pub fn heal(&self) {
        self.failures.lock().clear();
    }

    /// Sleep inside every query, widening check-then-act windows.
    pub fn set_query_delay(&self, delay: Duration) {
        *self.query_delay.lock() = Some(delay);
    }

    /// Sleep inside every `array_union` / `array_remove`, so a read of a
    /// player set can go stale before the write lands.
    pub fn set_array_write_delay(&self, delay: Duration) {
        *self.array_write_delay.lock() = Some(delay);
    }

    pub fn calls(&self, op: Op, collection: &str) -> usize {
        self.calls
            .lock()
            .get(&(op, collection.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    fn check(&self, op: Op, collection: &str) -> StoreResult<()> {
        *self
            .calls
            .lock()
            .entry((op, collection.to_string()))
            .or_insert(0) += 1;

        match self.failures.lock().get(&(op, collection.to_string())) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn array_write_pause(&self) {
        let delay = *self.array_write_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    async fn add(&self, collection: &str, data: Document) -> StoreResult<String> {
        self.check(Op::Add, collection)?;
        self.inner.add(collection, data).await
    }

    async fn set(&self, collection: &str, id: &str, data: Document) -> StoreResult<()> {
        self.check(Op::Set, collection)?;
        self.inner.set(collection, id, data).await
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        self.check(Op::Get, collection)?;
        self.inner.get(collection, id).await
    }

    async fn query(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> StoreResult<Vec<StoredDocument>> {
        self.check(Op::Query, collection)?;
        let delay = *self.query_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.query(collection, filter).await
    }

    async fn array_union(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> StoreResult<()> {
        self.check(Op::ArrayUnion, collection)?;
        self.array_write_pause().await;
        self.inner.array_union(collection, id, field, values).await
    }

    async fn array_remove(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> StoreResult<()> {
        self.check(Op::ArrayRemove, collection)?;
        self.array_write_pause().await;
        self.inner.array_remove(collection, id, field, values).await
    }

    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> StoreResult<()> {
        self.check(Op::Increment, collection)?;
        self.inner.increment(collection, id, field, delta).await
    }
}
