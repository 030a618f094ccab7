use super::value::{leaf_value, parse_bool, parse_u64};
use crate::model::DiskConfig;
use crate::namespace::{
    DISK_READONLY_KEY, DISK_ROTATIONAL_KEY, DISK_SERIAL_KEY, DISK_SIZE_KEY, DISK_TYPE_KEY,
};
use crate::store::KvNode;
use crate::{InventoryError, Result};

pub fn decode_disks(node_id: &str, disks_root: &KvNode) -> Result<Vec<DiskConfig>> {
    let mut disks = Vec::with_capacity(disks_root.children.len());

    for (index, disk_node) in disks_root.children.iter().enumerate() {
        let disk = decode_disk(disk_node).map_err(|error| {
            tracing::error!("Failed to get disk {} for node {}: {}", index, node_id, error);
            InventoryError::DiskDecode {
                node_id: node_id.to_string(),
                index,
                source: Box::new(error),
            }
        })?;
        disks.push(disk);
    }

    Ok(disks)
}

/// Decode one probe record stored under `disks/<name>`.
pub fn decode_disk(disk_node: &KvNode) -> Result<DiskConfig> {
    let mut disk = DiskConfig {
        name: disk_node.segment().to_string(),
        ..Default::default()
    };

    for property in &disk_node.children {
        let name = property.segment();
        match name {
            DISK_SIZE_KEY => disk.size = parse_u64(&property.key, leaf_value(property)?)?,
            DISK_ROTATIONAL_KEY => {
                disk.rotational = parse_bool(&property.key, leaf_value(property)?)?
            }
            DISK_READONLY_KEY => disk.readonly = parse_bool(&property.key, leaf_value(property)?)?,
            DISK_TYPE_KEY => disk.disk_type = leaf_value(property)?.to_string(),
            DISK_SERIAL_KEY => disk.serial = leaf_value(property)?.to_string(),
            _ => tracing::warn!("unknown disk property key {}, skipping", name),
        }
    }

    Ok(disk)
}
