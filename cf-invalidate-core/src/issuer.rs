use crate::{batch::InvalidationBatch, error::InvalidationResult};

/// Acknowledgment returned by the provider for a submitted batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvalidationReceipt {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// Submits one invalidation batch to the content-delivery provider.
///
/// Callers never pass an empty batch.
#[async_trait::async_trait]
pub trait InvalidationIssuer: Send + Sync {
    async fn issue(&self, batch: &InvalidationBatch) -> InvalidationResult<InvalidationReceipt>;
}

#[async_trait::async_trait]
impl<T: InvalidationIssuer + ?Sized> InvalidationIssuer for Box<T> {
    async fn issue(&self, batch: &InvalidationBatch) -> InvalidationResult<InvalidationReceipt> {
        (**self).issue(batch).await
    }
}
