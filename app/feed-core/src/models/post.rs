//! Feed post model.

use chrono::{DateTime, Utc};
use doc_store::{Document, Fields};
use error_types::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One feed entry. Created once, never edited or deleted; `created_at` is
/// the store-assigned commit timestamp and the sole feed sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Store-assigned document id.
    #[serde(default)]
    pub id: String,
    pub image_url: String,
    pub caption: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Decode a stored document, carrying the store-assigned id along.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let mut fields = doc.fields.clone();
        fields.insert("id".to_string(), Value::from(doc.id.clone()));
        serde_json::from_value(Value::Object(fields))
            .map_err(|err| AppError::store(format!("malformed post document {}: {err}", doc.id)))
    }
}

/// Wire fields for a new post; `createdAt` is stamped by the store.
pub fn new_post_fields(image_url: &str, caption: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert("imageUrl".to_string(), json!(image_url));
    fields.insert("caption".to_string(), json!(caption));
    fields
}
