//! Inventory model → store keys, one leaf per field, in the layout the
//! decoder reads back.

use crate::Result;
use crate::model::{DiskConfig, MemoryConfig, NetworkConfig, NodeConfig, ProcessorConfig};
use crate::namespace::{
    Category, DISK_READONLY_KEY, DISK_ROTATIONAL_KEY, DISK_SERIAL_KEY, DISK_SIZE_KEY,
    DISK_TYPE_KEY, MEMORY_TOTAL_SIZE_KEY, NETWORK_IPV4_ADDRESS_KEY, NETWORK_IPV6_ADDRESS_KEY,
    NETWORK_SPEED_KEY, NodeKeys, PROC_BITS_KEY, PROC_CORE_ID_KEY, PROC_NUM_CORES_KEY,
    PROC_PHYSICAL_ID_KEY, PROC_SIBLINGS_KEY, PROC_SPEED_KEY,
};
use crate::store::KvStore;

async fn write_properties(
    store: &dyn KvStore,
    parent: &str,
    properties: &[(&str, String)],
) -> Result<()> {
    for (name, value) in properties {
        store.set(&NodeKeys::property(parent, name), value).await?;
    }
    Ok(())
}

pub async fn write_disks(store: &dyn KvStore, keys: &NodeKeys, disks: &[DiskConfig]) -> Result<()> {
    for disk in disks {
        let disk_key = keys.disk(&disk.name);
        write_properties(
            store,
            &disk_key,
            &[
                (DISK_SIZE_KEY, disk.size.to_string()),
                (DISK_ROTATIONAL_KEY, disk.rotational.to_string()),
                (DISK_READONLY_KEY, disk.readonly.to_string()),
                (DISK_TYPE_KEY, disk.disk_type.clone()),
                (DISK_SERIAL_KEY, disk.serial.clone()),
            ],
        )
        .await?;
        tracing::debug!("Stored disk {} under {}", disk.name, disk_key);
    }
    Ok(())
}

pub async fn write_processors(
    store: &dyn KvStore,
    keys: &NodeKeys,
    processors: &[ProcessorConfig],
) -> Result<()> {
    for processor in processors {
        write_properties(
            store,
            &keys.processor(processor.id),
            &[
                (PROC_PHYSICAL_ID_KEY, processor.physical_id.to_string()),
                (PROC_SIBLINGS_KEY, processor.siblings.to_string()),
                (PROC_CORE_ID_KEY, processor.core_id.to_string()),
                (PROC_NUM_CORES_KEY, processor.num_cores.to_string()),
                (PROC_SPEED_KEY, processor.speed.to_string()),
                (PROC_BITS_KEY, processor.bits.to_string()),
            ],
        )
        .await?;
    }
    Ok(())
}

pub async fn write_memory(
    store: &dyn KvStore,
    keys: &NodeKeys,
    memory: &MemoryConfig,
) -> Result<()> {
    write_properties(
        store,
        &keys.category(Category::Memory),
        &[(MEMORY_TOTAL_SIZE_KEY, memory.total_size.to_string())],
    )
    .await
}

pub async fn write_network(
    store: &dyn KvStore,
    keys: &NodeKeys,
    adapters: &[NetworkConfig],
) -> Result<()> {
    for adapter in adapters {
        write_properties(
            store,
            &keys.adapter(&adapter.name),
            &[
                (NETWORK_IPV4_ADDRESS_KEY, adapter.ipv4_address.clone()),
                (NETWORK_IPV6_ADDRESS_KEY, adapter.ipv6_address.clone()),
                (NETWORK_SPEED_KEY, adapter.speed.to_string()),
            ],
        )
        .await?;
    }
    Ok(())
}

/// Write every category of `config` plus the IP address.
pub async fn write_node_config(
    store: &dyn KvStore,
    keys: &NodeKeys,
    config: &NodeConfig,
) -> Result<()> {
    store.set(&keys.ip_address(), &config.ip_address).await?;
    write_disks(store, keys, &config.disks).await?;
    write_processors(store, keys, &config.processors).await?;
    write_memory(store, keys, &config.memory).await?;
    write_network(store, keys, &config.network_adapters).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_node_config;
    use crate::namespace::Namespace;
    use crate::store::memory::MemoryStore;

    fn sample_config() -> NodeConfig {
        NodeConfig {
            ip_address: "192.168.1.20".to_string(),
            disks: vec![
                DiskConfig {
                    name: "nvme0n1".to_string(),
                    size: 1_000_204_886_016,
                    rotational: false,
                    readonly: false,
                    disk_type: "disk".to_string(),
                    serial: "S4EWNX0N".to_string(),
                },
                DiskConfig {
                    name: "sda".to_string(),
                    size: 4_000_787_030_016,
                    rotational: true,
                    readonly: true,
                    disk_type: "disk".to_string(),
                    serial: String::new(),
                },
            ],
            processors: vec![
                ProcessorConfig {
                    id: 0,
                    physical_id: 0,
                    siblings: 2,
                    core_id: 0,
                    num_cores: 2,
                    speed: 3392.1234567,
                    bits: 64,
                },
                ProcessorConfig {
                    id: 1,
                    physical_id: 0,
                    siblings: 2,
                    core_id: 1,
                    num_cores: 2,
                    speed: 0.1 + 0.2,
                    bits: 64,
                },
            ],
            memory: MemoryConfig {
                total_size: u64::MAX,
            },
            network_adapters: vec![NetworkConfig {
                name: "eth0".to_string(),
                ipv4_address: "192.168.1.20".to_string(),
                ipv6_address: String::new(),
                speed: 10_000,
            }],
        }
    }

    #[tokio::test]
    async fn test_decode_reads_back_what_was_written() {
        let store = MemoryStore::new();
        let keys = Namespace::default().node("node-a");
        let config = sample_config();

        write_node_config(&store, &keys, &config).await.unwrap();

        let subtree = store.get_tree(keys.config_root()).await.unwrap();
        let decoded = decode_node_config("node-a", Some(&subtree)).unwrap();
        assert_eq!(decoded, config);
    }

    #[tokio::test]
    async fn test_write_memory_layout() {
        let store = MemoryStore::new();
        let keys = Namespace::new("/inv").node("n1");

        write_memory(&store, &keys, &MemoryConfig { total_size: 42 })
            .await
            .unwrap();

        assert_eq!(store.get("/inv/n1/mem/totalsize").await.unwrap(), "42");
        assert_eq!(store.len().await, 1);
    }
}
