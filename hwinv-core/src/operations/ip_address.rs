use crate::Result;
use crate::namespace::Namespace;
use crate::store::KvStore;

/// Every store error, not-found included, goes back to the caller.
pub async fn get_ip_address(
    store: &dyn KvStore,
    namespace: &Namespace,
    node_id: &str,
) -> Result<String> {
    let key = namespace.node(node_id).ip_address();
    store.get(&key).await.inspect_err(|error| {
        tracing::warn!("failed to get IP address for node {}: {}", node_id, error);
    })
}

pub async fn set_ip_address(
    store: &dyn KvStore,
    namespace: &Namespace,
    node_id: &str,
    ip_address: &str,
) -> Result<()> {
    let key = namespace.node(node_id).ip_address();
    store.set(&key, ip_address).await?;
    tracing::info!("Set IP address of node {} to {}", node_id, ip_address);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_ip_address_last_write_wins() {
        let store = MemoryStore::new();
        let namespace = Namespace::default();

        set_ip_address(&store, &namespace, "node-1", "10.0.0.1").await.unwrap();
        set_ip_address(&store, &namespace, "node-1", "10.0.0.2").await.unwrap();

        assert_eq!(
            get_ip_address(&store, &namespace, "node-1").await.unwrap(),
            "10.0.0.2"
        );
        assert_eq!(
            store
                .get("/hwinv/nodes/discovered/node-1/ipaddress")
                .await
                .unwrap(),
            "10.0.0.2"
        );
    }

    #[tokio::test]
    async fn test_missing_ip_address_propagates_not_found() {
        let store = MemoryStore::new();
        let err = get_ip_address(&store, &Namespace::default(), "ghost")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
