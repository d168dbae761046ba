pub mod file_store;
pub mod memory_store;

use crate::core::models::store_query::{MatchLimit, StoreQuery, StoreStatus, StoredItem};
use crate::core::traits::secure_store::StoreResult;

/// Shared item-table semantics for every store backend.
///
/// Backends only differ in where the `Vec<StoredItem>` lives; matching,
/// duplicate detection and shaping happen here.
pub(crate) fn insert_item(
    items: &mut Vec<StoredItem>,
    query: &StoreQuery,
    payload: &[u8],
) -> StoreResult<()> {
    validate(query)?;
    if items.iter().any(|item| query.matches(item)) {
        return Err(StoreStatus::DuplicateItem);
    }
    items.push(StoredItem::from_query(query, payload));
    Ok(())
}

pub(crate) fn find_items(items: &[StoredItem], query: &StoreQuery) -> StoreResult<Vec<StoredItem>> {
    validate(query)?;
    let take = match query.match_limit {
        MatchLimit::One => 1,
        MatchLimit::All => usize::MAX,
    };
    let found: Vec<_> = items
        .iter()
        .filter(|item| query.matches(item))
        .take(take)
        .map(|item| item.shaped(query.return_shape))
        .collect();

    if found.is_empty() {
        return Err(StoreStatus::ItemNotFound);
    }
    Ok(found)
}

pub(crate) fn delete_items(items: &mut Vec<StoredItem>, query: &StoreQuery) -> StoreResult<()> {
    validate(query)?;
    let before = items.len();
    items.retain(|item| !query.matches(item));
    if items.len() == before {
        return Err(StoreStatus::ItemNotFound);
    }
    Ok(())
}

fn validate(query: &StoreQuery) -> StoreResult<()> {
    if query.identifier.is_empty() {
        return Err(StoreStatus::InvalidQuery);
    }
    Ok(())
}
