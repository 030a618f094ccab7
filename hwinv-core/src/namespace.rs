//! Store layout for discovered node hardware.
//!
//! ```text
//! <root>/<node_id>/ipaddress
//! <root>/<node_id>/disks/<name>/{size,rotational,readonly,type,serial}
//! <root>/<node_id>/cpu/<ordinal>/{physicalid,siblings,coreid,numcores,speed,bits}
//! <root>/<node_id>/mem/totalsize
//! <root>/<node_id>/net/<adapter>/{ipv4address,ipv6address,speed}
//! ```

use crate::keypath::compose_key;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISCOVERED_NODES_ROOT: &str = "/hwinv/nodes/discovered";

pub const IP_ADDRESS_KEY: &str = "ipaddress";
pub const DISKS_KEY: &str = "disks";
pub const PROCESSORS_KEY: &str = "cpu";
pub const MEMORY_KEY: &str = "mem";
pub const NETWORK_KEY: &str = "net";

pub const DISK_SIZE_KEY: &str = "size";
pub const DISK_ROTATIONAL_KEY: &str = "rotational";
pub const DISK_READONLY_KEY: &str = "readonly";
pub const DISK_TYPE_KEY: &str = "type";
pub const DISK_SERIAL_KEY: &str = "serial";

pub const PROC_PHYSICAL_ID_KEY: &str = "physicalid";
pub const PROC_SIBLINGS_KEY: &str = "siblings";
pub const PROC_CORE_ID_KEY: &str = "coreid";
pub const PROC_NUM_CORES_KEY: &str = "numcores";
pub const PROC_SPEED_KEY: &str = "speed";
pub const PROC_BITS_KEY: &str = "bits";

pub const MEMORY_TOTAL_SIZE_KEY: &str = "totalsize";

pub const NETWORK_IPV4_ADDRESS_KEY: &str = "ipv4address";
pub const NETWORK_IPV6_ADDRESS_KEY: &str = "ipv6address";
pub const NETWORK_SPEED_KEY: &str = "speed";

/// Top-level entries under a node's config root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Disks,
    Processors,
    Memory,
    Network,
    IpAddress,
}

impl Category {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            DISKS_KEY => Some(Category::Disks),
            PROCESSORS_KEY => Some(Category::Processors),
            MEMORY_KEY => Some(Category::Memory),
            NETWORK_KEY => Some(Category::Network),
            IP_ADDRESS_KEY => Some(Category::IpAddress),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Disks => DISKS_KEY,
            Category::Processors => PROCESSORS_KEY,
            Category::Memory => MEMORY_KEY,
            Category::Network => NETWORK_KEY,
            Category::IpAddress => IP_ADDRESS_KEY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    #[serde(default = "default_discovered_nodes_root")]
    pub discovered_nodes_root: String,
}

fn default_discovered_nodes_root() -> String {
    DEFAULT_DISCOVERED_NODES_ROOT.to_string()
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            discovered_nodes_root: default_discovered_nodes_root(),
        }
    }
}

impl Namespace {
    pub fn new(discovered_nodes_root: impl Into<String>) -> Self {
        Self {
            discovered_nodes_root: discovered_nodes_root.into(),
        }
    }

    pub fn root(&self) -> &str {
        &self.discovered_nodes_root
    }

    pub fn node(&self, node_id: &str) -> NodeKeys {
        NodeKeys {
            config_root: compose_key(&[self.root(), node_id]),
        }
    }
}

/// Every key belonging to one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeKeys {
    config_root: String,
}

impl NodeKeys {
    /// Key under which all hardware for the node is stored.
    pub fn config_root(&self) -> &str {
        &self.config_root
    }

    pub fn ip_address(&self) -> String {
        self.category(Category::IpAddress)
    }

    pub fn category(&self, category: Category) -> String {
        compose_key(&[self.config_root.as_str(), category.as_str()])
    }

    pub fn disk(&self, name: &str) -> String {
        compose_key(&[self.config_root.as_str(), DISKS_KEY, name])
    }

    pub fn processor(&self, ordinal: usize) -> String {
        compose_key(&[
            self.config_root.as_str(),
            PROCESSORS_KEY,
            &ordinal.to_string(),
        ])
    }

    pub fn adapter(&self, name: &str) -> String {
        compose_key(&[self.config_root.as_str(), NETWORK_KEY, name])
    }

    pub fn property(parent: &str, name: &str) -> String {
        compose_key(&[parent, name])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_keys_layout() {
        let keys = Namespace::default().node("node-1");
        assert_eq!(keys.config_root(), "/hwinv/nodes/discovered/node-1");
        assert_eq!(keys.ip_address(), "/hwinv/nodes/discovered/node-1/ipaddress");
        assert_eq!(
            keys.processor(3),
            "/hwinv/nodes/discovered/node-1/cpu/3"
        );
        assert_eq!(
            NodeKeys::property(&keys.adapter("eth0"), NETWORK_SPEED_KEY),
            "/hwinv/nodes/discovered/node-1/net/eth0/speed"
        );
    }

    #[test]
    fn test_category_round_trip() {
        for category in [
            Category::Disks,
            Category::Processors,
            Category::Memory,
            Category::Network,
            Category::IpAddress,
        ] {
            assert_eq!(Category::from_segment(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_segment("gpu"), None);
    }
}
