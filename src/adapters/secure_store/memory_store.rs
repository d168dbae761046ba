use std::sync::Mutex;

use crate::core::models::store_query::{StoreQuery, StoreStatus, StoredItem};
use crate::core::traits::secure_store::{SecureStore, StoreResult};

/// In-process secure store. Contents vanish with the process.
///
/// Used by tests and by `--store memory` for throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<Vec<StoredItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<T>(
        &self,
        f: impl FnOnce(&mut Vec<StoredItem>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut items = self.items.lock().map_err(|_| StoreStatus::Unavailable)?;
        f(&mut items)
    }
}

impl SecureStore for MemoryStore {
    fn add(&self, query: &StoreQuery, payload: &[u8]) -> StoreResult<()> {
        self.with_items(|items| super::insert_item(items, query, payload))
    }

    fn copy_matching(&self, query: &StoreQuery) -> StoreResult<Vec<StoredItem>> {
        self.with_items(|items| super::find_items(items, query))
    }

    fn delete(&self, query: &StoreQuery) -> StoreResult<()> {
        self.with_items(|items| super::delete_items(items, query))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
