use crate::{repair_all, Card, CollectionStore, StorageError, DEFAULT_COLLECTION};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Process-local store. Clones share the same map, so two stores opened on
/// different keys behave like two keys of one blob store.
#[derive(Clone)]
pub struct MemoryStore {
    key: String,
    blobs: Arc<RwLock<HashMap<String, Vec<Card>>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_COLLECTION)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            blobs: Arc::default(),
        }
    }

    /// Another view of the same map under a different collection key.
    pub fn sibling(&self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            blobs: Arc::clone(&self.blobs),
        }
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    fn collection(&self) -> &str {
        &self.key
    }

    async fn load(&self) -> Result<Vec<Card>, StorageError> {
        let mut cards = self.blobs.read().get(&self.key).cloned().unwrap_or_default();
        repair_all(&mut cards);
        Ok(cards)
    }

    async fn save(&self, cards: &[Card]) -> Result<(), StorageError> {
        self.blobs.write().insert(self.key.clone(), cards.to_vec());
        Ok(())
    }
}
