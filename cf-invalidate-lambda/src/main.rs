use aws_config::BehaviorVersion;
use cf_invalidate_config::Config;
use cf_invalidate_core::{
    issuers::{cloudfront::CloudFrontIssuer, dry_run::DryRunIssuer},
    InvalidationHandler, InvalidationIssuer, InvocationOutput, PathTranslator, S3Notification,
};
use lambda_runtime::{service_fn, LambdaEvent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config is checked before the runtime starts polling for events.
    let config = Config::load();
    setup_tracing(config.as_ref().map(|c| c.log_level.as_str()).unwrap_or("info"));
    let config = config.map_err(|e| {
        tracing::error!("Failed to load config: {}. Exiting.", e);
        anyhow::anyhow!("Failed to load config: {}", e)
    })?;

    tracing::info!(
        distribution_id = %config.distribution_id,
        policy = %config.policy,
        dry_run = config.dry_run,
        "starting invalidation handler"
    );

    let issuer: Box<dyn InvalidationIssuer> = if config.dry_run {
        Box::new(DryRunIssuer)
    } else {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let client = aws_sdk_cloudfront::Client::new(&sdk_config);
        Box::new(CloudFrontIssuer::new(client, config.distribution_id.clone()))
    };
    let handler = InvalidationHandler::new(PathTranslator::from_config(&config), issuer);
    let handler = &handler;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<S3Notification>| async move {
            handle_event(handler, event).await
        },
    ))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {}", e))?;

    Ok(())
}

async fn handle_event(
    handler: &InvalidationHandler<Box<dyn InvalidationIssuer>>,
    event: LambdaEvent<S3Notification>,
) -> Result<InvocationOutput, lambda_runtime::Error> {
    let request_id = event.context.request_id.clone();
    let records = event.payload.len();
    tracing::debug!(request_id = %request_id, records, "received notification");

    handler.handle(&event.payload).await.map_err(|e| {
        tracing::error!(request_id = %request_id, error = %e, "invalidation failed");
        lambda_runtime::Error::from(e)
    })
}

fn setup_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={level},cf_invalidate_core={level}",
                    env!("CARGO_CRATE_NAME"),
                    level = log_level
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time(),
        )
        .init();
}
