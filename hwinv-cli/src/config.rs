use hwinv_core::{InventoryError, LoadPolicy, Namespace, Result, StoreBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Node used when a subcommand is not given `--node-id`.
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub namespace: Namespace,
    pub store: StoreConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub load_policy: LoadPolicy,
}

/// Store backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub etcd: Option<EtcdConfig>,
    pub redis: Option<RedisConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Etcd,
    Redis,
    Memory,
}

impl StoreBackend {
    fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Etcd => "etcd",
            StoreBackend::Redis => "redis",
            StoreBackend::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtcdConfig {
    pub endpoints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}

impl ProbeConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

fn default_command_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path))
            .add_source(::config::Environment::with_prefix("HWINV"))
            .build()
            .map_err(|e| InventoryError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| InventoryError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn store_builder(&self) -> StoreBuilder {
        let mut builder = StoreBuilder::new().backend(self.store.backend.as_str());
        if let Some(etcd) = &self.store.etcd {
            builder = builder.etcd_endpoints(etcd.endpoints.clone());
        }
        if let Some(redis) = &self.store.redis {
            builder = builder.redis_url(redis.url.clone());
        }
        builder
    }

    /// `--node-id` wins over the configured default.
    pub fn resolve_node_id(&self, cli_node_id: Option<String>) -> Result<String> {
        cli_node_id
            .or_else(|| self.node_id.clone())
            .map(|node_id| node_id.trim().to_string())
            .filter(|node_id| !node_id.is_empty())
            .ok_or_else(|| {
                InventoryError::Config(
                    "node_id is required: pass --node-id or set node_id in the config".to_string(),
                )
            })
    }
}
