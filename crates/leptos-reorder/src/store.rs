//! Ordered record store boundary.
//!
//! The authoritative collection lives behind [`OrderedStore`]; the client
//! treats whatever it holds locally as a disposable cache of the last
//! fetch. [`MemoryStore`] is the in-memory implementation used by the test
//! suite and headless embeddings.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::record::OrderedRecord;

/// Transport or store-side failure, stringified at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// The surface the reordering engine needs from the backing store.
///
/// `?Send` because the engine runs on the single-threaded UI event loop
/// and wasm futures are not `Send`.
#[async_trait(?Send)]
pub trait OrderedStore<R: OrderedRecord> {
    /// Fetch every record of the collection, in no particular order.
    async fn list(&self) -> Result<Vec<R>, StoreError>;

    /// Persist one record, `position` included. The full record is sent;
    /// no partial-field semantics are assumed.
    async fn update(&self, record: &R) -> Result<(), StoreError>;
}

/// In-memory [`OrderedStore`] with injectable failures and call counters.
pub struct MemoryStore<R: OrderedRecord> {
    records: RefCell<Vec<R>>,
    fail_update: RefCell<HashMap<R::Id, String>>,
    fail_list: RefCell<Option<String>>,
    update_calls: Cell<usize>,
    list_calls: Cell<usize>,
}

impl<R: OrderedRecord> MemoryStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: RefCell::new(records),
            fail_update: RefCell::new(HashMap::new()),
            fail_list: RefCell::new(None),
            update_calls: Cell::new(0),
            list_calls: Cell::new(0),
        }
    }

    /// Make every update of the record `id` fail with `reason`.
    pub fn fail_update_for(&self, id: R::Id, reason: impl Into<String>) {
        self.fail_update.borrow_mut().insert(id, reason.into());
    }

    /// Make subsequent `list` calls fail with `reason`.
    pub fn fail_list(&self, reason: impl Into<String>) {
        *self.fail_list.borrow_mut() = Some(reason.into());
    }

    pub fn clear_failures(&self) {
        self.fail_update.borrow_mut().clear();
        *self.fail_list.borrow_mut() = None;
    }

    /// Snapshot of the stored records, in insertion order.
    pub fn records(&self) -> Vec<R> {
        self.records.borrow().clone()
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.get()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }
}

#[async_trait(?Send)]
impl<R: OrderedRecord> OrderedStore<R> for MemoryStore<R> {
    async fn list(&self) -> Result<Vec<R>, StoreError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if let Some(reason) = self.fail_list.borrow().clone() {
            return Err(StoreError(reason));
        }
        Ok(self.records.borrow().clone())
    }

    async fn update(&self, record: &R) -> Result<(), StoreError> {
        self.update_calls.set(self.update_calls.get() + 1);
        if let Some(reason) = self.fail_update.borrow().get(&record.id()) {
            return Err(StoreError(reason.clone()));
        }
        let mut records = self.records.borrow_mut();
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(StoreError(format!("record {} not found", record.id()))),
        }
    }
}
