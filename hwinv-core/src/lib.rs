//! Hwinv Core - cluster node hardware inventory kept in a hierarchical
//! key-value store.
//!
//! - `decode`: store subtree → [`NodeConfig`]
//! - `encode`: [`NodeConfig`] → store keys
//! - `operations`: bulk load, hardware discovery, IP address access
//! - `store`: etcd, redis and in-memory backends

pub mod decode;
pub mod encode;
pub mod error;
pub mod keypath;
pub mod model;
pub mod namespace;
pub mod operations;
pub mod probe;
pub mod store;

pub use decode::decode_node_config;
pub use error::{InventoryError, Result};
pub use keypath::{compose_key, leaf_segment};
pub use model::{DiskConfig, MemoryConfig, NetworkConfig, NodeConfig, ProcessorConfig};
pub use namespace::{Category, Namespace, NodeKeys};
pub use operations::{
    DiscoverHardwareOperation, DiscoverHardwareOperationRequest, DiscoverHardwareOperationResult,
    Disposition, LoadInventoryOperation, LoadInventoryResult, LoadPolicy, get_ip_address,
    set_ip_address,
};
pub use probe::{CommandExecutor, Executor};
pub use store::etcd::EtcdStore;
pub use store::factory::StoreBuilder;
pub use store::memory::MemoryStore;
pub use store::redis::RedisStore;
pub use store::{DynKvStore, KvNode, KvStore};
