//! Store tree → inventory model.
//!
//! Each immediate child of a node's config root is dispatched by its leaf
//! segment to a category parser. Unknown names are skipped; a value that does
//! not convert aborts the whole node.

pub mod disks;
pub mod memory;
pub mod network;
pub mod processors;
pub(crate) mod value;

pub use disks::{decode_disk, decode_disks};
pub use memory::decode_memory;
pub use network::decode_network;
pub use processors::decode_processors;

use crate::model::NodeConfig;
use crate::namespace::Category;
use crate::store::KvNode;
use crate::{InventoryError, Result};

pub fn decode_node_config(node_id: &str, subtree: Option<&KvNode>) -> Result<NodeConfig> {
    let Some(root) = subtree else {
        return Err(InventoryError::MissingData(node_id.to_string()));
    };

    let mut config = NodeConfig::default();
    for child in &root.children {
        let Some(category) = Category::from_segment(child.segment()) else {
            tracing::warn!(
                "unexpected hardware component {} on node {}, skipping",
                child.key,
                node_id
            );
            continue;
        };

        decode_category(node_id, category, child, &mut config).inspect_err(|error| {
            tracing::error!(
                "failed to load {} config for node {}: {}",
                category.as_str(),
                node_id,
                error
            );
        })?;
    }

    Ok(config)
}

fn decode_category(
    node_id: &str,
    category: Category,
    node: &KvNode,
    config: &mut NodeConfig,
) -> Result<()> {
    match category {
        Category::Disks => config.disks = decode_disks(node_id, node)?,
        Category::Processors => config.processors = decode_processors(node_id, node)?,
        Category::Memory => config.memory = decode_memory(node_id, node)?,
        Category::Network => config.network_adapters = decode_network(node_id, node)?,
        Category::IpAddress => {
            if node.is_dir() {
                return Err(InventoryError::InvalidShape {
                    key: node.key.clone(),
                    reason: "IP address is a directory, but it's expected to be a key"
                        .to_string(),
                });
            }
            config.ip_address = node.value_or_empty().to_string();
        }
    }
    Ok(())
}
