use super::{KvNode, KvStore, tree::child_segments};
use crate::keypath::SEPARATOR;
use crate::{InventoryError, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// Redis backend storing every leaf as a plain string key.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        tracing::info!("Connected to redis at {}", url);
        Ok(Self { conn })
    }

    /// Keys under `dir`, lexically sorted.
    async fn scan_under(&self, dir: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}{}*", escape_glob(dir), SEPARATOR);

        let mut keys = Vec::new();
        let mut iter: redis::AsyncIter<String> = conn.scan_match(pattern).await?;
        while let Some(key) = iter.next_item().await {
            keys.push(key);
        }

        keys.sort();
        Ok(keys)
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<String> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        value.ok_or_else(|| InventoryError::NotFound(key.to_string()))
    }

    async fn get_tree(&self, key: &str) -> Result<KvNode> {
        let dir = key.trim_end_matches(SEPARATOR);
        let mut keys = vec![dir.to_string()];
        keys.extend(self.scan_under(dir).await?);

        let mut conn = self.conn.clone();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;

        let pairs = keys
            .iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|value| (key.as_str(), value)));

        KvNode::from_pairs(dir, pairs).ok_or_else(|| InventoryError::NotFound(key.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await?;
        tracing::debug!("redis set {}", key);
        Ok(())
    }

    async fn list_children(&self, key: &str) -> Result<Vec<String>> {
        let dir = key.trim_end_matches(SEPARATOR);
        let keys = self.scan_under(dir).await?;
        let children = child_segments(dir, keys.iter().map(String::as_str));

        if children.is_empty() {
            let mut conn = self.conn.clone();
            let exists: bool = conn.exists(dir).await?;
            if !exists {
                return Err(InventoryError::NotFound(key.to_string()));
            }
        }

        Ok(children)
    }
}

/// Escape glob metacharacters so a key prefix matches literally in SCAN.
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_glob() {
        assert_eq!(escape_glob("/hwinv/nodes"), "/hwinv/nodes");
        assert_eq!(escape_glob("/a*b/[x]?"), "/a\\*b/\\[x\\]\\?");
    }
}
