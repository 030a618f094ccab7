use super::value::{leaf_value, parse_u64};
use crate::Result;
use crate::model::MemoryConfig;
use crate::namespace::MEMORY_TOTAL_SIZE_KEY;
use crate::store::KvNode;

pub fn decode_memory(node_id: &str, memory_root: &KvNode) -> Result<MemoryConfig> {
    let mut memory = MemoryConfig::default();

    for property in &memory_root.children {
        let name = property.segment();
        match name {
            MEMORY_TOTAL_SIZE_KEY => {
                memory.total_size = parse_u64(&property.key, leaf_value(property)?)?
            }
            _ => tracing::warn!(
                "unknown memory property key {} on node {}, skipping",
                name,
                node_id
            ),
        }
    }

    Ok(memory)
}
