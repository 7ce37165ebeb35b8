use tracing::info;

use crate::{
    batch::InvalidationBatch,
    error::InvalidationResult,
    issuer::{InvalidationIssuer, InvalidationReceipt},
};

/// Logs the batch instead of sending it.
pub struct DryRunIssuer;

#[async_trait::async_trait]
impl InvalidationIssuer for DryRunIssuer {
    async fn issue(&self, batch: &InvalidationBatch) -> InvalidationResult<InvalidationReceipt> {
        info!(
            caller_reference = %batch.caller_reference,
            paths = ?batch.items(),
            "dry run: not submitting invalidation"
        );
        Ok(InvalidationReceipt::default())
    }
}
