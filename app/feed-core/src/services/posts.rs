//! Post use-cases: create a post, load the feed one-shot.

use crate::models::forms::CreatePostForm;
use crate::models::post::{new_post_fields, Post};
use crate::services::POSTS_COLLECTION;
use crate::validators::validate_caption;
use blob_store::{paths::post_image_key, BlobStore, IMAGE_JPEG};
use chrono::Utc;
use doc_store::{DocumentStore, SortDirection, CREATED_AT};
use error_types::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PostService {
    store: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Create a post from the screen's form state and return the new id.
    ///
    /// Validation runs before any network call: an image must be selected
    /// and the caption must survive trimming. The image uploads first; only
    /// then is the document written. A write failure after a successful
    /// upload leaves the blob orphaned: logged and accepted, not recovered.
    pub async fn create_post(&self, form: CreatePostForm) -> Result<String> {
        let image = form
            .image
            .ok_or_else(|| AppError::validation("Please select an image for your post"))?;
        let caption = validate_caption(&form.caption)?;

        let bytes = image.read_bytes().await?;
        let key = post_image_key(Utc::now());
        let image_url = self.blobs.upload(&key, bytes, IMAGE_JPEG).await?;
        debug!(%key, "post image uploaded");

        let id = match self
            .store
            .add_document(POSTS_COLLECTION, new_post_fields(&image_url, &caption))
            .await
        {
            Ok(id) => id,
            Err(err) => {
                warn!(%image_url, "post write failed after upload, blob is orphaned");
                return Err(err);
            }
        };
        info!(post_id = %id, "post created");
        Ok(id)
    }

    /// One-shot feed read, newest first.
    pub async fn load_feed(&self) -> Result<Vec<Post>> {
        let docs = self
            .store
            .query_ordered(POSTS_COLLECTION, CREATED_AT, SortDirection::Descending)
            .await?;
        docs.iter().map(Post::from_document).collect()
    }
}
