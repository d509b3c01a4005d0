//! S3-backed blob store.

use crate::config::StorageConfig;
use crate::BlobStore;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use error_types::{AppError, Result};
use std::sync::Arc;

/// Production blob backend: a thin pass-through to S3 `put_object`.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Arc<Client>,
    config: StorageConfig,
}

impl S3BlobStore {
    /// Create a client with configuration from the environment.
    pub async fn new() -> Self {
        Self::with_config(StorageConfig::from_env()).await
    }

    /// Create a client with custom storage configuration.
    pub async fn with_config(config: StorageConfig) -> Self {
        let aws_config = aws_config::load_from_env().await;
        let client = Client::new(&aws_config);
        Self {
            client: Arc::new(client),
            config,
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(AppError::store)?;

        tracing::debug!(key, bucket = %self.config.bucket, "object uploaded");
        Ok(self.config.public_url(key))
    }
}
