use std::collections::HashMap;

use tokio::sync::RwLock;

use nladdr_core::PlaceCandidate;

/// Process-lifetime memo of place-search answers keyed on the exact query
/// string. Entries are never evicted.
///
/// Two requests racing on the same new key both compute and both insert;
/// the values are equal for a given query so the last write is harmless.
#[derive(Debug, Default)]
pub struct PlaceCache {
    entries: RwLock<HashMap<String, Vec<PlaceCandidate>>>,
}

impl PlaceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, query: &str) -> Option<Vec<PlaceCandidate>> {
        self.entries.read().await.get(query).cloned()
    }

    pub async fn insert(&self, query: String, results: Vec<PlaceCandidate>) {
        self.entries.write().await.insert(query, results);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
