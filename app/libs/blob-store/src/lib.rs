//! Blob-store contract for image uploads.
//!
//! One operation matters: write bytes to a collision-resistant key and hand
//! back a publicly fetchable URL that is readable the moment the call
//! returns. No retries; failures surface to the caller unmodified. Keys are
//! built by [`paths`] so an upload never lands on an existing object.

use async_trait::async_trait;
use error_types::Result;

pub mod config;
pub mod memory;
pub mod paths;
pub mod s3;

pub use config::StorageConfig;
pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;

/// JPEG-compatible bytes are the only content the app uploads.
pub const IMAGE_JPEG: &str = "image/jpeg";

/// Contract every blob backend must satisfy.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write one new object at `key` and resolve its public URL.
    ///
    /// Exactly one object is created per call; nothing is overwritten or
    /// deleted. On success the URL is immediately readable.
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}
