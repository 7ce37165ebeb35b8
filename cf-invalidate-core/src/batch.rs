use std::fmt::Display;

use serde::Serialize;
use uuid::Uuid;

/// Uniqueness token attached to every invalidation request.
///
/// CloudFront treats a repeated reference as a retry of the earlier request,
/// so each batch gets a fresh random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CallerReference(String);

impl CallerReference {
    pub fn generate() -> Self {
        CallerReference(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CallerReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Paths {
    pub quantity: usize,
    pub items: Vec<String>,
}

/// Payload of one CreateInvalidation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvalidationBatch {
    pub paths: Paths,
    pub caller_reference: CallerReference,
}

impl InvalidationBatch {
    /// `None` when there is nothing to invalidate.
    pub fn new(items: Vec<String>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(InvalidationBatch {
            paths: Paths {
                quantity: items.len(),
                items,
            },
            caller_reference: CallerReference::generate(),
        })
    }

    pub fn items(&self) -> &[String] {
        &self.paths.items
    }
}

/// Result of one handler invocation. Serializes to the batch, or to `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InvocationOutput {
    Submitted(InvalidationBatch),
    Skipped {},
}

impl InvocationOutput {
    pub fn batch(&self) -> Option<&InvalidationBatch> {
        match self {
            InvocationOutput::Submitted(batch) => Some(batch),
            InvocationOutput::Skipped {} => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn empty_path_list_builds_no_batch() {
        assert!(InvalidationBatch::new(Vec::new()).is_none());
    }

    #[test]
    fn quantity_matches_items() {
        let batch = InvalidationBatch::new(vec!["/a".into(), "/b/".into(), "/b/index.html".into()])
            .unwrap();
        assert_eq!(batch.paths.quantity, 3);
        assert_eq!(batch.items(), ["/a", "/b/", "/b/index.html"]);
    }

    #[test]
    fn serializes_in_cloudfront_shape() {
        let batch = InvalidationBatch::new(vec!["/tag/*".into()]).unwrap();
        let json = serde_json::to_value(InvocationOutput::Submitted(batch.clone())).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "Paths": { "Quantity": 1, "Items": ["/tag/*"] },
                "CallerReference": batch.caller_reference.as_str(),
            })
        );
    }

    #[test]
    fn skipped_output_serializes_to_empty_object() {
        let json = serde_json::to_string(&InvocationOutput::Skipped {}).unwrap();
        assert_eq!(json, "{}");
        assert!(InvocationOutput::Skipped {}.batch().is_none());
    }

    #[test]
    fn caller_references_are_unique() {
        let refs: HashSet<_> = (0..10_000).map(|_| CallerReference::generate()).collect();
        assert_eq!(refs.len(), 10_000);
    }

    #[test]
    fn batches_never_share_a_reference() {
        let a = InvalidationBatch::new(vec!["/x".into()]).unwrap();
        let b = InvalidationBatch::new(vec!["/x".into()]).unwrap();
        assert_ne!(a.caller_reference, b.caller_reference);
    }
}
