use serde::{Deserialize, Serialize};

/// Hardware inventory of one cluster node. The node id is not stored here;
/// it is the key of the map returned by the bulk loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub ip_address: String,
    pub disks: Vec<DiskConfig>,
    pub processors: Vec<ProcessorConfig>,
    pub memory: MemoryConfig,
    pub network_adapters: Vec<NetworkConfig>,
}

/// Block device as reported by the disk probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskConfig {
    pub name: String,
    pub size: u64,
    pub rotational: bool,
    pub readonly: bool,
    pub disk_type: String,
    pub serial: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub id: usize,
    pub physical_id: usize,
    pub siblings: usize,
    pub core_id: usize,
    pub num_cores: usize,
    /// Clock speed in MHz.
    pub speed: f64,
    pub bits: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Bytes.
    pub total_size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub ipv4_address: String,
    pub ipv6_address: String,
    pub speed: u64,
}
