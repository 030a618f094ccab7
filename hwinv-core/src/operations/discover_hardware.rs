use crate::Result;
use crate::encode::write_disks;
use crate::model::DiskConfig;
use crate::namespace::Namespace;
use crate::probe::{Executor, discover_disks};
use crate::store::DynKvStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct DiscoverHardwareOperation {
    store: DynKvStore,
    executor: Arc<dyn Executor>,
    namespace: Namespace,
}

#[derive(Debug, Clone)]
pub struct DiscoverHardwareOperationRequest {
    pub node_id: String,
}

#[derive(Debug, Clone)]
pub struct DiscoverHardwareOperationResult {
    pub config_key: String,
    pub disks: Vec<DiskConfig>,
}

impl DiscoverHardwareOperation {
    pub fn new(store: DynKvStore, executor: Arc<dyn Executor>, namespace: Namespace) -> Self {
        Self {
            store,
            executor,
            namespace,
        }
    }

    pub async fn run(
        &self,
        request: DiscoverHardwareOperationRequest,
    ) -> Result<DiscoverHardwareOperationResult> {
        let DiscoverHardwareOperationRequest { node_id } = request;
        let keys = self.namespace.node(&node_id);

        let disks = discover_disks(self.executor.as_ref()).await?;
        write_disks(self.store.as_ref(), &keys, &disks).await?;
        tracing::info!(
            "Stored {} disks for node {} under {}",
            disks.len(),
            node_id,
            keys.config_root()
        );

        // TODO: probe processors, memory and network adapters; the decoder
        // already reads cpu/, mem/ and net/.

        Ok(DiscoverHardwareOperationResult {
            config_key: keys.config_root().to_string(),
            disks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_node_config;
    use crate::store::KvStore;
    use crate::store::memory::MemoryStore;
    use crate::{InventoryError, operations::set_ip_address};
    use async_trait::async_trait;

    struct FixedExecutor {
        result: std::result::Result<String, String>,
    }

    #[async_trait]
    impl Executor for FixedExecutor {
        async fn execute_command_with_output(
            &self,
            _command: &str,
            _args: &[&str],
        ) -> Result<String> {
            self.result.clone().map_err(InventoryError::Probe)
        }
    }

    #[tokio::test]
    async fn test_discovered_disks_decode_back() {
        let store = Arc::new(MemoryStore::new());
        let executor = Arc::new(FixedExecutor {
            result: Ok(concat!(
                r#"NAME="sdb" SIZE="2000398934016" ROTA="1" RO="0" TYPE="disk" SERIAL="ZDH1""#,
                "\n",
                r#"NAME="sda" SIZE="256060514304" ROTA="0" RO="0" TYPE="disk" SERIAL="""#,
                "\n",
            )
            .to_string()),
        });
        let namespace = Namespace::default();
        let operation =
            DiscoverHardwareOperation::new(store.clone(), executor, namespace.clone());

        let result = operation
            .run(DiscoverHardwareOperationRequest {
                node_id: "node-9".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(result.config_key, "/hwinv/nodes/discovered/node-9");
        assert_eq!(result.disks.len(), 2);
        assert_eq!(
            store
                .get("/hwinv/nodes/discovered/node-9/disks/sdb/size")
                .await
                .unwrap(),
            "2000398934016"
        );

        set_ip_address(store.as_ref(), &namespace, "node-9", "10.1.0.9")
            .await
            .unwrap();
        let subtree = store.get_tree(&result.config_key).await.unwrap();
        let config = decode_node_config("node-9", Some(&subtree)).unwrap();

        // Store order is lexical, probe order is not.
        let names: Vec<&str> = config.disks.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["sda", "sdb"]);
        assert_eq!(config.disks[1], result.disks[0]);
        assert_eq!(config.ip_address, "10.1.0.9");
    }

    #[tokio::test]
    async fn test_probe_failure_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let executor = Arc::new(FixedExecutor {
            result: Err("lsblk: command not found".to_string()),
        });
        let operation =
            DiscoverHardwareOperation::new(store.clone(), executor, Namespace::default());

        let err = operation
            .run(DiscoverHardwareOperationRequest {
                node_id: "node-9".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Probe(_)));
        assert!(store.is_empty().await);
    }
}
