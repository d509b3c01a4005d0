//! Configuration for the demo deployment.
//!
//! Everything loads from environment variables with hardcoded fallbacks;
//! a `.env` file is honored in development builds.

use anyhow::Result;
use blob_store::StorageConfig;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// The single hardcoded identity the demo runs as.
    pub demo_user_id: String,
    pub storage: StorageConfig,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
            info!("Loaded .env file for development");
        }

        let demo_user_id = env::var("DEMO_USER_ID").unwrap_or_else(|_| "user123".to_string());
        if demo_user_id.trim().is_empty() {
            anyhow::bail!("DEMO_USER_ID must not be empty");
        }

        Ok(Settings {
            demo_user_id,
            storage: StorageConfig::from_env(),
        })
    }
}
