use super::value::{leaf_value, parse_f64, parse_u32};
use crate::Result;
use crate::model::ProcessorConfig;
use crate::namespace::{
    PROC_BITS_KEY, PROC_CORE_ID_KEY, PROC_NUM_CORES_KEY, PROC_PHYSICAL_ID_KEY, PROC_SIBLINGS_KEY,
    PROC_SPEED_KEY,
};
use crate::store::KvNode;

/// Processors under `cpu/<ordinal>`. The ordinal segment becomes the id.
pub fn decode_processors(node_id: &str, procs_root: &KvNode) -> Result<Vec<ProcessorConfig>> {
    let mut processors = Vec::with_capacity(procs_root.children.len());

    for proc_node in &procs_root.children {
        let mut processor = ProcessorConfig {
            id: parse_u32(&proc_node.key, proc_node.segment())?,
            ..Default::default()
        };

        for property in &proc_node.children {
            let name = property.segment();
            let key = property.key.as_str();
            match name {
                PROC_PHYSICAL_ID_KEY => {
                    processor.physical_id = parse_u32(key, leaf_value(property)?)?
                }
                PROC_SIBLINGS_KEY => processor.siblings = parse_u32(key, leaf_value(property)?)?,
                PROC_CORE_ID_KEY => processor.core_id = parse_u32(key, leaf_value(property)?)?,
                PROC_NUM_CORES_KEY => processor.num_cores = parse_u32(key, leaf_value(property)?)?,
                PROC_SPEED_KEY => processor.speed = parse_f64(key, leaf_value(property)?)?,
                PROC_BITS_KEY => processor.bits = parse_u32(key, leaf_value(property)?)?,
                _ => tracing::warn!(
                    "unknown processor property key {} on node {}, skipping",
                    name,
                    node_id
                ),
            }
        }

        processors.push(processor);
    }

    Ok(processors)
}
