//! Profile use-cases: load with a synthesized default, save with
//! create-vs-update dispatch.

use crate::models::forms::EditProfileForm;
use crate::models::profile::{profile_fields, Profile};
use crate::services::USERS_COLLECTION;
use crate::validators::{validate_bio, validate_name};
use blob_store::{paths::profile_image_key, BlobStore, IMAGE_JPEG};
use chrono::Utc;
use doc_store::DocumentStore;
use error_types::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Point read; an absent profile synthesizes the in-memory placeholder
    /// without persisting it.
    pub async fn load_profile(&self, user_id: &str) -> Result<Profile> {
        match self.store.get_document(USERS_COLLECTION, user_id).await? {
            Some(doc) => Profile::from_document(&doc),
            None => {
                debug!(%user_id, "no stored profile, using placeholder");
                Ok(Profile::placeholder(user_id))
            }
        }
    }

    /// Save the edit-profile form.
    ///
    /// Name and bio are validated before any store call. A freshly picked
    /// image uploads first and its URL supersedes the form's photo URL.
    /// Existence is re-checked immediately before the write to choose
    /// create vs update; the re-check is not transactional, which is fine
    /// for the single-writer demo contract.
    pub async fn save_profile(&self, user_id: &str, form: EditProfileForm) -> Result<()> {
        let name = validate_name(&form.name)?;
        let bio = validate_bio(&form.bio)?;

        let mut photo_url = form.photo_url;
        let mut uploaded = false;
        if let Some(image) = form.new_image {
            let bytes = image.read_bytes().await?;
            let key = profile_image_key(user_id, Utc::now());
            photo_url = Some(self.blobs.upload(&key, bytes, IMAGE_JPEG).await?);
            uploaded = true;
            debug!(%user_id, %key, "profile image uploaded");
        }

        let fields = profile_fields(&name, &bio, photo_url.as_deref());

        let exists = self
            .store
            .get_document(USERS_COLLECTION, user_id)
            .await?
            .is_some();
        let write = if exists {
            self.store.update_document(USERS_COLLECTION, user_id, fields)
        } else {
            self.store.set_document(USERS_COLLECTION, user_id, fields)
        };
        if let Err(err) = write.await {
            if uploaded {
                warn!(%user_id, "profile write failed after upload, blob is orphaned");
            }
            return Err(err);
        }

        info!(%user_id, created = !exists, "profile saved");
        Ok(())
    }
}
