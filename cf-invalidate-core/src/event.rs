//! S3 object-change notifications.
//!
//! The bucket notification delivers `{ "Records": [ ... ] }` where each record
//! carries the changed object's key under `s3.object.key`. Only the key is
//! required; the remaining fields are kept for logging.
//!
//! A record without a key fails the whole notification: no partial batch is
//! ever built, the error goes back to the runtime.

use serde::Deserialize;
use tracing::debug;

use crate::error::{InvalidationError, InvalidationResult};

#[derive(Debug, Deserialize)]
struct S3Record {
    #[serde(rename = "eventName")]
    event_name: Option<String>,
    s3: Option<S3Entity>,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: Option<S3Bucket>,
    object: Option<S3Object>,
}

#[derive(Debug, Deserialize)]
struct S3Bucket {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S3Object {
    key: Option<String>,
}

/// One storage-object mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub key: String,
    pub event_name: Option<String>,
    pub bucket: Option<String>,
}

impl ChangeRecord {
    pub fn new(key: impl Into<String>) -> Self {
        ChangeRecord {
            key: key.into(),
            event_name: None,
            bucket: None,
        }
    }
}

/// Raw notification payload as handed over by the runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct S3Notification {
    records: Vec<serde_json::Value>,
}

impl From<serde_json::Value> for S3Notification {
    fn from(input: serde_json::Value) -> Self {
        // Normally { "Records": [ ... ] }; a bare array or a single record
        // object is accepted too.
        let records = if let Some(records) = input.get("Records").and_then(|v| v.as_array()) {
            records.to_vec()
        } else if let Some(records) = input.as_array() {
            records.to_vec()
        } else {
            vec![input]
        };
        S3Notification { records }
    }
}

impl S3Notification {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extract the change records in delivery order.
    pub fn change_records(&self) -> InvalidationResult<Vec<ChangeRecord>> {
        let mut out = Vec::with_capacity(self.records.len());
        for (index, value) in self.records.iter().enumerate() {
            let record: S3Record = serde_json::from_value(value.clone())
                .map_err(|_| InvalidationError::MissingKey { index })?;
            let (bucket, object) = match record.s3 {
                Some(s3) => (s3.bucket.and_then(|b| b.name), s3.object),
                None => (None, None),
            };
            let key = object
                .and_then(|o| o.key)
                .ok_or(InvalidationError::MissingKey { index })?;

            debug!(index, key = %key, event_name = ?record.event_name, "parsed change record");
            out.push(ChangeRecord {
                key,
                event_name: record.event_name,
                bucket,
            });
        }
        Ok(out)
    }
}
