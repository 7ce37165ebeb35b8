//! Per-notification flow: records -> paths -> at most one invalidation.

use tracing::info;

use crate::{
    batch::{InvalidationBatch, InvocationOutput},
    error::InvalidationResult,
    event::S3Notification,
    issuer::InvalidationIssuer,
    paths::PathTranslator,
};

pub struct InvalidationHandler<I: InvalidationIssuer> {
    translator: PathTranslator,
    issuer: I,
}

impl<I: InvalidationIssuer> InvalidationHandler<I> {
    pub fn new(translator: PathTranslator, issuer: I) -> Self {
        InvalidationHandler { translator, issuer }
    }

    pub fn issuer(&self) -> &I {
        &self.issuer
    }

    pub async fn handle(&self, notification: &S3Notification) -> InvalidationResult<InvocationOutput> {
        let records = notification.change_records()?;
        let paths = self.translator.translate(&records);

        let Some(batch) = InvalidationBatch::new(paths) else {
            info!(records = records.len(), "nothing to invalidate");
            return Ok(InvocationOutput::Skipped {});
        };

        info!(
            caller_reference = %batch.caller_reference,
            paths = ?batch.items(),
            "invalidating"
        );
        self.issuer.issue(&batch).await?;
        Ok(InvocationOutput::Submitted(batch))
    }
}
