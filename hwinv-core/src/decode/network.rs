use super::value::{leaf_value, parse_u64};
use crate::Result;
use crate::model::NetworkConfig;
use crate::namespace::{NETWORK_IPV4_ADDRESS_KEY, NETWORK_IPV6_ADDRESS_KEY, NETWORK_SPEED_KEY};
use crate::store::KvNode;

/// Adapters under `net/<name>`. Addresses are copied as-is.
pub fn decode_network(node_id: &str, network_root: &KvNode) -> Result<Vec<NetworkConfig>> {
    let mut adapters = Vec::with_capacity(network_root.children.len());

    for adapter_node in &network_root.children {
        let mut adapter = NetworkConfig {
            name: adapter_node.segment().to_string(),
            ..Default::default()
        };

        for property in &adapter_node.children {
            let name = property.segment();
            match name {
                NETWORK_IPV4_ADDRESS_KEY => {
                    adapter.ipv4_address = leaf_value(property)?.to_string()
                }
                NETWORK_IPV6_ADDRESS_KEY => {
                    adapter.ipv6_address = leaf_value(property)?.to_string()
                }
                NETWORK_SPEED_KEY => {
                    // Adapters without link report no speed.
                    let raw = leaf_value(property)?;
                    adapter.speed = if raw.is_empty() {
                        0
                    } else {
                        parse_u64(&property.key, raw)?
                    };
                }
                _ => tracing::warn!(
                    "unknown network adapter property key {} on node {}, skipping",
                    name,
                    node_id
                ),
            }
        }

        adapters.push(adapter);
    }

    Ok(adapters)
}
