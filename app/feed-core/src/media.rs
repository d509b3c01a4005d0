//! OS media-picker boundary.

use async_trait::async_trait;
use error_types::{AppError, Result};
use std::path::{Path, PathBuf};

/// Handle to locally available image bytes, as returned by the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    path: PathBuf,
}

impl ImageHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full contents into memory, ready for upload.
    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|err| {
            AppError::store(format!("failed to read image {}: {err}", self.path.display()))
        })
    }
}

/// Editing settings passed through to the OS picker unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerOptions {
    pub allow_editing: bool,
    pub aspect: (u32, u32),
    pub quality: f32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            allow_editing: true,
            aspect: (4, 3),
            quality: 0.8,
        }
    }
}

/// The one operation the picker offers. Permission denial and user
/// cancellation both come back as `None`; neither raises an error.
#[async_trait]
pub trait MediaPicker: Send + Sync {
    async fn pick_image(&self, options: PickerOptions) -> Option<ImageHandle>;
}

/// Picker double: hands out a preset image, or `None` to behave like a
/// denied or cancelled picker.
#[derive(Debug, Clone, Default)]
pub struct FixturePicker {
    handle: Option<ImageHandle>,
}

impl FixturePicker {
    pub fn with_image(handle: ImageHandle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub fn denied() -> Self {
        Self { handle: None }
    }
}

#[async_trait]
impl MediaPicker for FixturePicker {
    async fn pick_image(&self, _options: PickerOptions) -> Option<ImageHandle> {
        if self.handle.is_none() {
            tracing::debug!("media library access denied or selection cancelled");
        }
        self.handle.clone()
    }
}
