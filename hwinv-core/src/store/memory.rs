use super::{KvNode, KvStore, tree::child_segments};
use crate::{InventoryError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Process-local store, used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<String> {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound(key.to_string()))
    }

    async fn get_tree(&self, key: &str) -> Result<KvNode> {
        let entries = self.entries.read().await;
        let pairs = entries
            .range(key.to_string()..)
            .take_while(|(existing, _)| existing.starts_with(key))
            .map(|(existing, value)| (existing.as_str(), value.clone()));

        KvNode::from_pairs(key, pairs).ok_or_else(|| InventoryError::NotFound(key.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        tracing::debug!("memory store set {}", key);
        Ok(())
    }

    async fn list_children(&self, key: &str) -> Result<Vec<String>> {
        let entries = self.entries.read().await;
        let children = child_segments(
            key,
            entries
                .range(key.to_string()..)
                .take_while(|(existing, _)| existing.starts_with(key))
                .map(|(existing, _)| existing.as_str()),
        );

        if children.is_empty() && !entries.contains_key(key) {
            return Err(InventoryError::NotFound(key.to_string()));
        }

        Ok(children)
    }
}
