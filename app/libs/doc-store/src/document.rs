//! Document value model shared by every backend.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Field name the store stamps on every create.
pub const CREATED_AT: &str = "createdAt";
/// Field name the store refreshes on every write to an existing document.
pub const UPDATED_AT: &str = "updatedAt";

/// Raw field map of a document, exactly as stored.
pub type Fields = Map<String, Value>;

/// One stored document: its id plus the full field map, including the
/// store-stamped timestamp fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp_field(CREATED_AT)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp_field(UPDATED_AT)
    }

    fn timestamp_field(&self, name: &str) -> Option<DateTime<Utc>> {
        let millis = self.fields.get(name)?.as_i64()?;
        DateTime::from_timestamp_millis(millis)
    }
}

/// Total order over JSON values used for sort fields.
///
/// Types rank null < bool < number < string < composite; numbers compare
/// numerically, strings lexicographically, composites by their JSON
/// rendering. Store-stamped timestamps are plain integers, so creation
/// order and numeric order coincide.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn type_rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
