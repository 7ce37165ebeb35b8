pub mod batch;
pub mod error;
pub mod event;
pub mod handler;
pub mod issuer;
pub mod issuers;
pub mod paths;

pub use batch::{CallerReference, InvalidationBatch, InvocationOutput, Paths};
pub use cf_invalidate_config::TranslationPolicy;
pub use error::{InvalidationError, InvalidationResult};
pub use event::{ChangeRecord, S3Notification};
pub use handler::InvalidationHandler;
pub use issuer::{InvalidationIssuer, InvalidationReceipt};
pub use paths::{PathTranslator, TranslationRules};
