#[derive(thiserror::Error, Debug)]
pub enum InvalidationError {
    #[error("Change record {index} has no s3.object.key")]
    MissingKey { index: usize },
    #[error("CloudFront request failed: {0}")]
    CloudFront(#[from] aws_sdk_cloudfront::Error),
    #[error("Failed to build invalidation request: {0}")]
    RequestBuild(#[from] aws_sdk_cloudfront::error::BuildError),
}

pub type InvalidationResult<T> = Result<T, InvalidationError>;
