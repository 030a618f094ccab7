//! Hierarchical key-value store capability and its backends.

pub mod etcd;
pub mod factory;
pub mod memory;
pub mod redis;
pub mod tree;

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use tree::KvNode;

/// Path-addressed store holding the inventory.
///
/// Missing keys must surface as [`crate::InventoryError::NotFound`] so callers
/// can tell an absent node from an unreachable store. Children are returned
/// in lexical key order by every backend.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Value of a single leaf key.
    async fn get(&self, key: &str) -> Result<String>;

    /// `key` and all of its descendants.
    async fn get_tree(&self, key: &str) -> Result<KvNode>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Immediate child segments of a directory key.
    async fn list_children(&self, key: &str) -> Result<Vec<String>>;
}

pub type DynKvStore = Arc<dyn KvStore>;
