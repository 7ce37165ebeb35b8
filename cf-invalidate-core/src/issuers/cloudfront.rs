//! CloudFront `CreateInvalidation` client.

use aws_sdk_cloudfront::{types, Client};
use tracing::{debug, info};

use crate::{
    batch::InvalidationBatch,
    error::{InvalidationError, InvalidationResult},
    issuer::{InvalidationIssuer, InvalidationReceipt},
};

pub struct CloudFrontIssuer {
    client: Client,
    distribution_id: String,
}

impl CloudFrontIssuer {
    pub fn new(client: Client, distribution_id: impl Into<String>) -> Self {
        CloudFrontIssuer {
            client,
            distribution_id: distribution_id.into(),
        }
    }

    pub fn distribution_id(&self) -> &str {
        &self.distribution_id
    }
}

fn to_sdk_paths(batch: &InvalidationBatch) -> InvalidationResult<types::Paths> {
    // Quantity is an i32 on the wire; CloudFront caps paths per request far below it.
    let quantity = i32::try_from(batch.paths.quantity).unwrap_or(i32::MAX);
    types::Paths::builder()
        .quantity(quantity)
        .set_items(Some(batch.paths.items.clone()))
        .build()
        .map_err(InvalidationError::from)
}

/// Convert our batch into the SDK's request type.
pub fn to_sdk_batch(batch: &InvalidationBatch) -> InvalidationResult<types::InvalidationBatch> {
    types::InvalidationBatch::builder()
        .paths(to_sdk_paths(batch)?)
        .caller_reference(batch.caller_reference.as_str())
        .build()
        .map_err(InvalidationError::from)
}

#[async_trait::async_trait]
impl InvalidationIssuer for CloudFrontIssuer {
    async fn issue(&self, batch: &InvalidationBatch) -> InvalidationResult<InvalidationReceipt> {
        debug!(
            distribution_id = %self.distribution_id,
            caller_reference = %batch.caller_reference,
            "sending CreateInvalidation"
        );

        let output = self
            .client
            .create_invalidation()
            .distribution_id(&self.distribution_id)
            .invalidation_batch(to_sdk_batch(batch)?)
            .send()
            .await
            .map_err(aws_sdk_cloudfront::Error::from)?;

        let receipt = match output.invalidation() {
            Some(invalidation) => InvalidationReceipt {
                id: Some(invalidation.id().to_string()),
                status: Some(invalidation.status().to_string()),
            },
            None => InvalidationReceipt::default(),
        };

        info!(
            distribution_id = %self.distribution_id,
            invalidation_id = ?receipt.id,
            status = ?receipt.status,
            "invalidation created"
        );
        Ok(receipt)
    }
}
