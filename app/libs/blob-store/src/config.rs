//! Storage configuration shared by the blob backends.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Base URL for public access (CDN domain)
    pub base_url: String,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub path_style: bool,
}

impl StorageConfig {
    /// Load storage configuration from environment variables, with
    /// defaults suitable for the demo deployment.
    pub fn from_env() -> Self {
        Self {
            bucket: std::env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "snapfeed-media".to_string()),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            base_url: std::env::var("STORAGE_BASE_URL")
                .unwrap_or_else(|_| "https://s3.amazonaws.com".to_string()),
            path_style: std::env::var("STORAGE_PATH_STYLE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        }
    }

    /// Build the direct object URL
    pub fn object_url(&self, key: &str) -> String {
        if self.path_style {
            format!("{}/{}/{}", self.base_url, self.bucket, key)
        } else {
            format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
        }
    }

    /// Public URL for an object, served from the CDN domain
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(path_style: bool) -> StorageConfig {
        StorageConfig {
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            base_url: "https://cdn".to_string(),
            path_style,
        }
    }

    #[test]
    fn object_url_virtual_hosted_style() {
        let url = config(false).object_url("posts/image.jpg");
        assert_eq!(url, "https://test-bucket.s3.amazonaws.com/posts/image.jpg");
    }

    #[test]
    fn object_url_path_style() {
        let url = config(true).object_url("posts/image.jpg");
        assert_eq!(url, "https://cdn/test-bucket/posts/image.jpg");
    }

    #[test]
    fn public_url_uses_cdn_domain() {
        let url = config(false).public_url("posts/image.jpg");
        assert_eq!(url, "https://cdn/posts/image.jpg");
    }
}
