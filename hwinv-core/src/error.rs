use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("hardware info missing for node {0}")]
    MissingData(String),

    #[error("malformed value {value:?} at {key}: {reason}")]
    MalformedField {
        key: String,
        value: String,
        reason: String,
    },

    #[error("invalid shape at {key}: {reason}")]
    InvalidShape { key: String, reason: String },

    #[error("failed to decode disk {index} of node {node_id}: {source}")]
    DiskDecode {
        node_id: String,
        index: usize,
        #[source]
        source: Box<InventoryError>,
    },

    #[error("etcd error: {0}")]
    Etcd(#[from] etcd_client::Error),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("probe error: {0}")]
    Probe(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, InventoryError::NotFound(_))
    }

    pub(crate) fn malformed(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        InventoryError::MalformedField {
            key: key.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
