//! Process-lifetime cache of generated illustrations, keyed by the exact
//! prompt string. Entries are never evicted.
//!
//! The lock covers only `get` and `insert`, never a generation call, so two
//! tasks racing on the same uncached prompt may both generate. That duplicate
//! work is accepted; the cache exists to stop repeat work across requests,
//! not to serialize first-time generation.

use std::collections::HashMap;

use tokio::sync::Mutex;

#[derive(Default)]
pub struct ImageCache {
    entries: Mutex<HashMap<String, String>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, prompt: &str) -> Option<String> {
        self.entries.lock().await.get(prompt).cloned()
    }

    pub async fn insert(&self, prompt: String, image: String) {
        self.entries.lock().await.insert(prompt, image);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_by_exact_prompt() {
        let cache = ImageCache::new();
        cache.insert("a red fox".into(), "data:...".into()).await;

        assert_eq!(cache.get("a red fox").await.as_deref(), Some("data:..."));
        assert_eq!(cache.get("a red Fox").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn insert_overwrites_existing_entry() {
        let cache = ImageCache::new();
        cache.insert("p".into(), "one".into()).await;
        cache.insert("p".into(), "two".into()).await;

        assert_eq!(cache.get("p").await.as_deref(), Some("two"));
        assert_eq!(cache.len().await, 1);
    }
}
