use super::{DynKvStore, etcd::EtcdStore, memory::MemoryStore, redis::RedisStore};
use crate::{InventoryError, Result};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    backend: Option<String>,
    etcd_endpoints: Option<Vec<String>>,
    redis_url: Option<String>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    pub fn etcd_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.etcd_endpoints = Some(endpoints);
        self
    }

    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = Some(url.into());
        self
    }

    fn resolve_backend(&self) -> Result<String> {
        let backend = self
            .backend
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if backend.is_empty() {
            return Err(InventoryError::Config(
                "store backend cannot be empty".to_string(),
            ));
        }

        Ok(backend)
    }

    pub async fn build(&self) -> Result<DynKvStore> {
        let backend = self.resolve_backend()?;

        match backend.as_str() {
            "etcd" => {
                let endpoints: Vec<String> = self
                    .etcd_endpoints
                    .clone()
                    .ok_or_else(|| {
                        InventoryError::Config(
                            "etcd endpoints are required for etcd backend".to_string(),
                        )
                    })?
                    .into_iter()
                    .map(|endpoint| endpoint.trim().to_string())
                    .filter(|endpoint| !endpoint.is_empty())
                    .collect();

                if endpoints.is_empty() {
                    return Err(InventoryError::Config(
                        "etcd endpoints cannot be empty for etcd backend".to_string(),
                    ));
                }

                let store = EtcdStore::new(&endpoints).await?;
                Ok(Arc::new(store))
            }
            "redis" => {
                let url = self.redis_url.as_deref().unwrap_or_default().trim();
                if url.is_empty() {
                    return Err(InventoryError::Config(
                        "redis url is required for redis backend".to_string(),
                    ));
                }

                let store = RedisStore::new(url).await?;
                Ok(Arc::new(store))
            }
            "memory" => {
                tracing::warn!("Using in-memory store; inventory will not outlive this process");
                Ok(Arc::new(MemoryStore::new()))
            }
            other => Err(InventoryError::Config(format!(
                "unsupported store backend: {}",
                other
            ))),
        }
    }
}
