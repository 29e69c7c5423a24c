use crate::{Card, StorageError};
use async_trait::async_trait;

pub mod memory;

/// Whole-collection persistence, keyed by a collection name fixed at construction.
///
/// `load` on a collection that was never saved yields an empty list. `save`
/// replaces everything stored under the key; there is no partial update.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    fn collection(&self) -> &str;

    async fn load(&self) -> Result<Vec<Card>, StorageError>;
    async fn save(&self, cards: &[Card]) -> Result<(), StorageError>;
}
