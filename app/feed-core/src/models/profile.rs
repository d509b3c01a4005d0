//! Demo user profile model.

use chrono::{DateTime, Utc};
use doc_store::{Document, Fields};
use error_types::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Placeholder shown when no profile document exists yet.
pub const PLACEHOLDER_NAME: &str = "Demo User";
pub const PLACEHOLDER_BIO: &str = "Welcome to my profile! Click Edit Profile to customize.";

/// The single demo user's public identity.
///
/// `photo_url` absent renders as an initials placeholder in the view host.
/// Timestamps are `None` only on the synthesized placeholder, which is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// External user identifier, not generated by this system.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// In-memory default for a user with no stored profile.
    pub fn placeholder(user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            name: PLACEHOLDER_NAME.to_string(),
            bio: PLACEHOLDER_BIO.to_string(),
            photo_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Decode a stored document, carrying the document id along.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let mut fields = doc.fields.clone();
        fields.insert("id".to_string(), Value::from(doc.id.clone()));
        serde_json::from_value(Value::Object(fields)).map_err(|err| {
            AppError::store(format!("malformed profile document {}: {err}", doc.id))
        })
    }

    pub fn has_photo(&self) -> bool {
        self.photo_url.is_some()
    }
}

/// Wire fields for a profile write. A cleared photo is stored as an
/// explicit null; the store stamps the timestamps.
pub fn profile_fields(name: &str, bio: &str, photo_url: Option<&str>) -> Fields {
    let mut fields = Fields::new();
    fields.insert("name".to_string(), json!(name));
    fields.insert("bio".to_string(), json!(bio));
    fields.insert(
        "photoURL".to_string(),
        photo_url.map_or(Value::Null, |url| json!(url)),
    );
    fields
}
