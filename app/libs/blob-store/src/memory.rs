//! In-memory blob store for tests and the demo binary.

use crate::config::StorageConfig;
use crate::BlobStore;
use async_trait::async_trait;
use error_types::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory [`BlobStore`]: uploaded bytes are readable back immediately
/// under the same key their public URL points at.
#[derive(Clone)]
pub struct MemoryBlobStore {
    config: StorageConfig,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl MemoryBlobStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Bytes stored under `key`, if any.
    pub async fn contents(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).map(|o| o.bytes.clone())
    }

    /// Content type stored under `key`, if any.
    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.content_type.clone())
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        tracing::debug!(key, "object stored in memory");
        Ok(self.config.public_url(key))
    }
}
