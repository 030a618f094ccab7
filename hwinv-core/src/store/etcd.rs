use super::{KvNode, KvStore, tree::child_segments};
use crate::keypath::SEPARATOR;
use crate::{InventoryError, Result};
use async_trait::async_trait;
use etcd_client::{Client, GetOptions, SortOrder, SortTarget};

/// etcd v3 backend. Keys are flat, so a directory is any key prefix followed
/// by the separator.
#[derive(Clone)]
pub struct EtcdStore {
    client: Client,
}

impl EtcdStore {
    pub async fn new(endpoints: &[String]) -> Result<Self> {
        let client = Client::connect(endpoints, None).await?;
        tracing::info!("Connected to etcd at {:?}", endpoints);
        Ok(Self { client })
    }

    fn prefix_options() -> GetOptions {
        GetOptions::new()
            .with_prefix()
            .with_sort(SortTarget::Key, SortOrder::Ascend)
    }
}

#[async_trait]
impl KvStore for EtcdStore {
    async fn get(&self, key: &str) -> Result<String> {
        let mut client = self.client.clone();
        let response = client.get(key, None).await?;

        match response.kvs().first() {
            Some(kv) => Ok(kv.value_str()?.to_string()),
            None => Err(InventoryError::NotFound(key.to_string())),
        }
    }

    async fn get_tree(&self, key: &str) -> Result<KvNode> {
        let mut client = self.client.clone();
        let dir = key.trim_end_matches(SEPARATOR);

        // The bare prefix would also match siblings such as node-10 for node-1.
        let root = client.get(dir, None).await?;
        let children_prefix = format!("{}{}", dir, SEPARATOR);
        let children = client
            .get(children_prefix.as_str(), Some(Self::prefix_options()))
            .await?;

        let mut pairs = Vec::with_capacity(root.kvs().len() + children.kvs().len());
        for kv in root.kvs().iter().chain(children.kvs()) {
            pairs.push((kv.key_str()?, kv.value_str()?));
        }

        KvNode::from_pairs(dir, pairs).ok_or_else(|| InventoryError::NotFound(key.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut client = self.client.clone();
        client.put(key, value, None).await?;
        tracing::debug!("etcd put {}", key);
        Ok(())
    }

    async fn list_children(&self, key: &str) -> Result<Vec<String>> {
        let mut client = self.client.clone();
        let dir = key.trim_end_matches(SEPARATOR);

        let children_prefix = format!("{}{}", dir, SEPARATOR);
        let response = client
            .get(
                children_prefix.as_str(),
                Some(Self::prefix_options().with_keys_only()),
            )
            .await?;

        let mut keys = Vec::with_capacity(response.kvs().len());
        for kv in response.kvs() {
            keys.push(kv.key_str()?);
        }

        let children = child_segments(dir, keys);
        if children.is_empty() {
            let exact = client.get(dir, Some(GetOptions::new().with_count_only())).await?;
            if exact.count() == 0 {
                return Err(InventoryError::NotFound(key.to_string()));
            }
        }

        Ok(children)
    }
}
