use super::ip_address::get_ip_address;
use crate::decode::decode_node_config;
use crate::model::NodeConfig;
use crate::namespace::Namespace;
use crate::store::{DynKvStore, KvNode};
use crate::{InventoryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the loader does with a node when one of its stages fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Fail the whole load with this error.
    Abort,
    /// Leave the node out of the result and continue.
    SkipNode,
    /// Keep the node with what was gathered before the failure.
    KeepNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    FetchSubtree,
    Decode,
    FetchIpAddress,
}

/// Failure table for the bulk load. Defaults: a node without hardware is
/// skipped, an unreachable subtree keeps the node without hardware, a corrupt
/// subtree or a missing IP address fails the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadPolicy {
    pub missing_subtree: Disposition,
    pub unreachable_subtree: Disposition,
    pub malformed_subtree: Disposition,
    pub ip_lookup_failure: Disposition,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            missing_subtree: Disposition::SkipNode,
            unreachable_subtree: Disposition::KeepNode,
            malformed_subtree: Disposition::Abort,
            ip_lookup_failure: Disposition::Abort,
        }
    }
}

impl LoadPolicy {
    pub fn disposition(&self, stage: LoadStage, error: &InventoryError) -> Disposition {
        match stage {
            LoadStage::FetchSubtree if error.is_not_found() => self.missing_subtree,
            LoadStage::FetchSubtree => self.unreachable_subtree,
            LoadStage::Decode => self.malformed_subtree,
            LoadStage::FetchIpAddress => self.ip_lookup_failure,
        }
    }

    fn resolve<T>(
        &self,
        stage: LoadStage,
        node_id: &str,
        result: Result<T>,
        keep: impl FnOnce() -> T,
    ) -> StepOutcome<T> {
        let error = match result {
            Ok(value) => return StepOutcome::Proceed(value),
            Err(error) => error,
        };

        match self.disposition(stage, &error) {
            Disposition::Abort => {
                tracing::error!("{:?} failed for node {}: {}", stage, node_id, error);
                StepOutcome::Abort(error)
            }
            Disposition::SkipNode => {
                tracing::info!("skipping node {} after {:?}: {}", node_id, stage, error);
                StepOutcome::Skip
            }
            Disposition::KeepNode => {
                tracing::warn!(
                    "{:?} failed for node {}, keeping it: {}",
                    stage,
                    node_id,
                    error
                );
                StepOutcome::Proceed(keep())
            }
        }
    }
}

#[derive(Debug)]
pub enum StepOutcome<T> {
    Proceed(T),
    Skip,
    Abort(InventoryError),
}

impl<T> StepOutcome<T> {
    /// `Skip` becomes `Ok(None)` so stages chain with `?`.
    pub fn into_result(self) -> Result<Option<T>> {
        match self {
            StepOutcome::Proceed(value) => Ok(Some(value)),
            StepOutcome::Skip => Ok(None),
            StepOutcome::Abort(error) => Err(error),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadInventoryResult {
    pub nodes: BTreeMap<String, NodeConfig>,
}

#[derive(Clone)]
pub struct LoadInventoryOperation {
    store: DynKvStore,
    namespace: Namespace,
    policy: LoadPolicy,
}

impl LoadInventoryOperation {
    pub fn new(store: DynKvStore, namespace: Namespace) -> Self {
        Self {
            store,
            namespace,
            policy: LoadPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn run(&self) -> Result<LoadInventoryResult> {
        let root = self.namespace.root();
        let node_ids = match self.store.list_children(root).await {
            Ok(node_ids) => node_ids,
            Err(error) if error.is_not_found() => Vec::new(),
            Err(error) => {
                tracing::error!("failed to get the node ids under {}: {}", root, error);
                return Err(error);
            }
        };
        tracing::info!("Discovered {} nodes", node_ids.len());

        let mut nodes = BTreeMap::new();
        for node_id in node_ids {
            if let Some(config) = self.load_node(&node_id).await? {
                nodes.insert(node_id, config);
            }
        }

        tracing::info!("Loaded hardware config for {} nodes", nodes.len());
        Ok(LoadInventoryResult { nodes })
    }

    async fn load_node(&self, node_id: &str) -> Result<Option<NodeConfig>> {
        let keys = self.namespace.node(node_id);

        let fetched: Result<Option<KvNode>> =
            self.store.get_tree(keys.config_root()).await.map(Some);
        let Some(subtree) = self
            .policy
            .resolve(LoadStage::FetchSubtree, node_id, fetched, || None)
            .into_result()?
        else {
            return Ok(None);
        };

        let mut config = match subtree {
            Some(subtree) => {
                let decoded = decode_node_config(node_id, Some(&subtree));
                let Some(config) = self
                    .policy
                    .resolve(LoadStage::Decode, node_id, decoded, NodeConfig::default)
                    .into_result()?
                else {
                    return Ok(None);
                };
                config
            }
            None => NodeConfig::default(),
        };

        // The dedicated accessor is authoritative for the address.
        let decoded_ip = config.ip_address.clone();
        let fetched_ip = get_ip_address(self.store.as_ref(), &self.namespace, node_id).await;
        let Some(ip_address) = self
            .policy
            .resolve(LoadStage::FetchIpAddress, node_id, fetched_ip, || decoded_ip)
            .into_result()?
        else {
            return Ok(None);
        };
        config.ip_address = ip_address;

        Ok(Some(config))
    }
}
