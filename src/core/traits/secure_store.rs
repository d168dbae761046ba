use crate::core::models::store_query::{StoreQuery, StoreStatus, StoredItem};

/// Result of a secure store call: payload on success, status otherwise.
pub type StoreResult<T> = std::result::Result<T, StoreStatus>;

/// Port for a secure item store (credentials and key material).
///
/// Implementations live in `adapters::secure_store`. Calls are
/// synchronous and each one stands alone; there are no transactions
/// spanning several calls.
pub trait SecureStore: Send + Sync {
    /// Insert a new item. Fails with `DuplicateItem` when an item with
    /// the same class and identifier already exists.
    fn add(&self, query: &StoreQuery, payload: &[u8]) -> StoreResult<()>;

    /// Return items matching the query, shaped by its return shape and
    /// capped by its match limit. Fails with `ItemNotFound` on no match.
    fn copy_matching(&self, query: &StoreQuery) -> StoreResult<Vec<StoredItem>>;

    /// Delete every item matching the query. Fails with `ItemNotFound`
    /// when nothing matched.
    fn delete(&self, query: &StoreQuery) -> StoreResult<()>;

    /// Human-readable name of this backend (e.g. "file", "memory").
    fn name(&self) -> &str;
}

impl<T: SecureStore + ?Sized> SecureStore for Box<T> {
    fn add(&self, query: &StoreQuery, payload: &[u8]) -> StoreResult<()> {
        (**self).add(query, payload)
    }

    fn copy_matching(&self, query: &StoreQuery) -> StoreResult<Vec<StoredItem>> {
        (**self).copy_matching(query)
    }

    fn delete(&self, query: &StoreQuery) -> StoreResult<()> {
        (**self).delete(query)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
